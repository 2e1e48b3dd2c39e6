mod selection;
mod state;

pub use selection::Selection;
pub use state::AppState;
