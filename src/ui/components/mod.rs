//! Reusable UI components

pub mod input_bar;
pub mod pod_list;

pub use input_bar::InputBar;
pub use pod_list::PodList;
