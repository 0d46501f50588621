//! Property-based invariant tests for the navigation stack.
//!
//! For arbitrary sequences of push/pop/peek operations:
//!
//! 1. `push_pop_difference` equals the stack length after every operation.
//! 2. The stack never exceeds its capacity.
//! 3. Pushing `None` never changes the stack.
//! 4. A dynamic palette appears at most once.
//! 5. A rejected push leaves contents and counter untouched.
//! 6. `peek(0)` right after an accepted push returns the pushed palette.

use osk::models::Palette;
use osk::navigation::{NavigationError, NavigationStack, PushOutcome};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    PushStatic(u8),
    PushDynamic(u8),
    PushNone,
    Pop,
    Peek(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4).prop_map(Op::PushStatic),
        (0u8..4).prop_map(Op::PushDynamic),
        Just(Op::PushNone),
        Just(Op::Pop),
        (0usize..8).prop_map(Op::Peek),
        Just(Op::Peek(usize::MAX)),
    ]
}

fn snapshot(stack: &NavigationStack) -> Vec<String> {
    stack.iter().map(str::to_owned).collect()
}

proptest! {
    #[test]
    fn stack_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..120), capacity in 1usize..12) {
        let mut stack = NavigationStack::with_capacity(capacity);

        for op in ops {
            let before = snapshot(&stack);
            match op {
                Op::PushStatic(n) | Op::PushDynamic(n) => {
                    let palette = match op {
                        Op::PushDynamic(_) => Palette::dynamic(format!("dynamic{}", n)),
                        _ => Palette::new(format!("static{}", n)),
                    };
                    match stack.push(Some(&palette)) {
                        Ok(PushOutcome::Pushed) => {
                            prop_assert_eq!(stack.peek(0), Some(palette.name.as_str()));
                            prop_assert_eq!(stack.len(), before.len() + 1);
                        }
                        Ok(PushOutcome::AlreadyOnStack) => {
                            prop_assert!(palette.is_dynamic);
                            prop_assert_eq!(snapshot(&stack), before);
                        }
                        Ok(PushOutcome::Absent) => prop_assert!(false, "palette was given"),
                        Err(NavigationError::CapacityExceeded { capacity: c }) => {
                            prop_assert_eq!(c, capacity);
                            prop_assert_eq!(before.len(), capacity);
                            prop_assert_eq!(snapshot(&stack), before);
                        }
                        Err(other) => prop_assert!(false, "unexpected push error: {:?}", other),
                    }
                }
                Op::PushNone => {
                    prop_assert_eq!(stack.push(None), Ok(PushOutcome::Absent));
                    prop_assert_eq!(snapshot(&stack), before);
                }
                Op::Pop => {
                    let popped = stack.pop();
                    prop_assert_eq!(popped.as_ref(), before.last());
                }
                Op::Peek(distance) => {
                    let expected = before.iter().rev().nth(distance).map(String::as_str);
                    prop_assert_eq!(stack.peek(distance), expected);
                    prop_assert_eq!(snapshot(&stack), before);
                }
            }

            prop_assert_eq!(stack.push_pop_difference(), stack.len());
            prop_assert!(stack.len() <= capacity);
            for n in 0u8..4 {
                let name = format!("dynamic{}", n);
                prop_assert!(stack.iter().filter(|entry| *entry == name).count() <= 1);
            }
        }
    }
}

proptest! {
    #[test]
    fn static_duplicates_accumulate(count in 1usize..40) {
        let mut stack = NavigationStack::new();
        let main = Palette::new("main");
        for _ in 0..count {
            prop_assert_eq!(stack.push(Some(&main)), Ok(PushOutcome::Pushed));
        }
        prop_assert_eq!(stack.len(), count);
        prop_assert_eq!(stack.push_pop_difference(), count);
    }
}
