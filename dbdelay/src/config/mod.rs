mod pipeline_config;

pub use pipeline_config::{
    InputConfig, OutputConfig, PipelineConfig, ReportConfig, SplitConfig, WeatherConfig,
    DEFAULT_CONFIG,
};
