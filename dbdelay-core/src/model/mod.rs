mod delay_class;
mod merged_record;
mod temp_category;
mod train_record;
mod weather_sample;

pub use delay_class::DelayClass;
pub use merged_record::MergedRecord;
pub use temp_category::TempCategory;
pub use train_record::{TrainRecord, TRAIN_RECORD_COLUMNS};
pub use weather_sample::{WeatherReading, WeatherSample};
