pub mod pipeline;
pub mod stage0_normalize;
pub mod stage1_rewrite;
pub mod stage2_review;

pub use pipeline::*;
pub use stage0_normalize::*;
pub use stage1_rewrite::*;
pub use stage2_review::*;
