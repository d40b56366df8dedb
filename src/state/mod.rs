pub mod outlier_board;
pub mod selection;
