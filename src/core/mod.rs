pub mod counter;
pub mod selector;
pub mod types;

pub use counter::{CounterFrame, CounterTarget, CounterTween, parse_integer_prefix};
pub use selector::{AttributeCondition, CompoundSelector, Selector};
pub use types::{
    ElementRef, EventDisposition, IntersectionEntry, IntersectionOptions, ObserverKind,
    ScrollBehavior, ScrollBlock,
};
