pub mod control;
pub mod next;
pub mod step;

pub use control::ChainState;
pub use next::Next;
pub use step::Stage;
