//! Property tests for the lifecycle gate.

use modgate_lifecycle::gate::LifecycleGate;
use modgate_lifecycle::hook::OneShotHook;
use modgate_system::host::ModHost;
use modgate_system::mode::ModeSet;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Call {
    Preload(Option<ModeSet>),
    LoadComplete(Option<ModeSet>),
}

fn mode_set() -> impl Strategy<Value = Option<ModeSet>> {
    prop_oneof![
        1 => Just(None),
        6 => (0u8..16).prop_map(ModeSet::from_bits),
    ]
}

fn call() -> impl Strategy<Value = Call> {
    prop_oneof![
        mode_set().prop_map(Call::Preload),
        mode_set().prop_map(Call::LoadComplete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn enabled_tracks_allowed_intersects_last_mode(
        allowed in 0u8..16,
        calls in prop::collection::vec(call(), 1..40),
    ) {
        let allowed = ModeSet::from_bits(allowed).unwrap_or_default();
        let mut gate = LifecycleGate::new(allowed);

        for call in calls {
            let mode = match call {
                Call::Preload(mode) => {
                    gate.on_preload(mode);
                    mode
                }
                Call::LoadComplete(mode) => {
                    gate.on_load_complete(mode);
                    mode
                }
            };
            let observed = mode.unwrap_or_default();
            prop_assert_eq!(gate.last_mode(), observed);
            prop_assert_eq!(gate.is_enabled(), allowed.intersects(observed));
        }
    }

    #[test]
    fn one_shot_fires_once_per_cycle_that_ends_enabled(
        cycles in prop::collection::vec(
            (prop::collection::vec(mode_set(), 1..4), prop::option::of(mode_set())),
            1..20,
        ),
    ) {
        let host = ModHost::new();
        let mut gate = LifecycleGate::new(ModeSet::GAME);
        let mut hook = OneShotHook::empty();

        // Each cycle: one or more preloads (retries), then an optional completion.
        for (preloads, completion) in cycles {
            for mode in preloads {
                gate.on_preload(mode);
                prop_assert!(!gate.one_shot_fired());
            }
            if let Some(mode) = completion {
                gate.on_load_complete(mode);
                let enabled = gate.is_enabled();
                prop_assert_eq!(hook.fire(&mut gate, &host), enabled);
                prop_assert!(!hook.fire(&mut gate, &host));
            }
        }
    }
}
