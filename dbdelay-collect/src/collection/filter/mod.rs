mod station_row_predicate;

pub use station_row_predicate::StationRowPredicate;
