pub mod train;
pub mod visualize;

pub use train::{
    CancellationSignal, CollectingObserver, FrameRenderer, LoggingObserver, NeverCancel,
    TrainConfig, Trainer, TrainingFrame, TrainingObserver, TrainingOutcome,
};
pub use visualize::{DEFAULT_FRAME_DELAY, KeyboardCancel, TerminalView, VisualizeMode};
