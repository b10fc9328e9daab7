mod asof_ops;

pub use asof_ops::merge_asof;
