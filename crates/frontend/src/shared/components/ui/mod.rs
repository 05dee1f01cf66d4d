pub mod input;
pub mod radio;
pub mod textarea;

pub use input::Input;
pub use radio::RadioGroup;
pub use textarea::Textarea;
