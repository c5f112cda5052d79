pub mod stage1_prepare;
pub mod stage2_request;
pub mod stage3_standardize;
