// Module naming follows project convention (PascalCase subsystem modules)
#[allow(non_snake_case)]
pub mod Core {
    pub mod SharedMemory;
    pub use SharedMemory::{
        attach_shared_memory, create_shared_memory, remove_shared_memory, shared_memory_exists,
        RawHandle, SharedMemoryBackend,
    };
}
#[allow(non_snake_case)]
pub mod Stack {
    pub mod builder;
    pub mod coordinator;
    mod debug;
    pub mod layout;
    pub mod placement;
    pub use builder::CoordinatorBuilder;
    pub use coordinator::{InstanceClaim, ReleasePolicy, StackCoordinator};
    pub use layout::{StackSegment, DEFAULT_STACK_KEY};
    pub use placement::{Corner, Placement};
}
#[allow(non_snake_case)]
pub mod Text {
    pub mod measure;
    pub mod metrics;
    pub mod wrap;
    pub use measure::{FixedAdvance, TextMeasure};
    pub use metrics::LayoutMetrics;
    pub use wrap::{next_line, wrap, wrap_tokens, LineBreak, LineBuffer};
}
#[allow(non_snake_case)]
pub mod Lifecycle {
    pub mod event_loop;
    pub mod machine;
    pub mod signals;
    pub use event_loop::EventSource;
    pub use machine::{
        ButtonBindings, ExitOutcome, Lifecycle, LifecycleState, PopupEvent, Step, Trigger,
    };
    pub use signals::EventPoster;
}
#[allow(non_snake_case)]
pub mod Shell {
    pub mod color;
    pub mod font;
    pub mod x11;
}
#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
