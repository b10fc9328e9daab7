mod open_meteo;
mod weather_ops;
mod weather_query;
mod weather_source;

pub use open_meteo::{OpenMeteoHourly, OpenMeteoResponse};
pub use weather_ops::{fetch_weather, parse_weather_json};
pub use weather_query::{WeatherQuery, HOURLY_VARIABLES, OPEN_METEO_ARCHIVE_URL};
pub use weather_source::WeatherSource;
