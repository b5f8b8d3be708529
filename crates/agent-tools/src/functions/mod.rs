//! Built-in functions.
//!
//! Fetch functions carry a handler and run on the server. Render functions
//! are schemas only; their payload goes back to the UI un-executed.

mod render;
mod time;
mod username;
mod weather;

pub use render::render_specs;
pub use time::CurrentTime;
pub use username::Username;
pub use weather::{CurrentWeather, TemperatureFormat, WeatherReport};
