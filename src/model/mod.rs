pub mod feature;
pub mod project;
pub mod slug;
pub mod tag;
pub mod task;
pub mod timeline;

pub use feature::Feature;
pub use project::Project;
pub use tag::Tag;
pub use task::Task;
