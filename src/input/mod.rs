pub mod keyboard;
pub mod mock;

pub use keyboard::KeyboardInputHandler;
pub use mock::MockPointerInput;
