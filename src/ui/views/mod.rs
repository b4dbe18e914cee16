mod category_list;
mod image_list;

pub use category_list::CategoryListView;
pub use image_list::ImageListView;
