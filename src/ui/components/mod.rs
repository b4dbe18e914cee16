mod category_form;
mod category_tabs;
mod command_input;
mod confirm;
mod footer;
mod image_form;
mod input;
mod key_result;
mod search_input;
mod size_input;

pub use category_form::{CategoryForm, CategoryFormData, CategoryFormEvent};
pub use category_tabs::CategoryTabs;
pub use command_input::{CommandEvent, CommandInput};
pub use confirm::{ConfirmDialog, ConfirmEvent};
pub use footer::draw_footer;
pub use image_form::{ImageForm, ImageFormData, ImageFormEvent};
pub use input::{InputResult, TextInput};
pub use key_result::KeyResult;
pub use search_input::{SearchEvent, SearchInput};
pub use size_input::{SizeRangeEvent, SizeRangeInput};
