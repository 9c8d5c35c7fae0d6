mod algorithm;
mod export;
mod hyperparams;
mod iter;

pub use algorithm::*;
pub use export::*;
pub use hyperparams::*;
pub use iter::*;
