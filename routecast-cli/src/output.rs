use routecast_core::{
    City, ObservationOrigin, RouteIntelligence, WeatherObservation,
    model::{WeatherStatus, weather_status},
};

pub fn print_cities(cities: &[City]) {
    if cities.is_empty() {
        println!("No cities found along the route.");
        return;
    }

    for (i, city) in cities.iter().enumerate() {
        println!("{:>2}. {} ({})", i + 1, city.name, city.coordinate);
    }
}

pub fn print_route_weather(route: &RouteIntelligence) {
    if route.cities.is_empty() {
        println!("No cities found along the route.");
        return;
    }

    println!(
        "Weather along route ({} cities, {}):",
        route.cities.len(),
        route.built_at.format("%Y-%m-%d %H:%M UTC")
    );

    for (i, city) in route.cities.iter().enumerate() {
        match weather_status(&route.weather, &city.name) {
            WeatherStatus::Ready(obs) => {
                println!("{:>2}. {}", i + 1, weather_line(&city.name, obs));
            }
            WeatherStatus::Unavailable => {
                println!("{:>2}. {:<20} weather unavailable", i + 1, city.name);
            }
        }
    }
}

fn weather_line(name: &str, obs: &WeatherObservation) -> String {
    let marker = match obs.origin {
        ObservationOrigin::Live => "",
        ObservationOrigin::Fallback => "  [fallback]",
        ObservationOrigin::Synthetic => "  [synthetic]",
    };

    format!(
        "{:<20} {:>4}°C (feels {}°C)  {}  humidity {}%  wind {} km/h{}",
        name,
        obs.temperature_c,
        obs.feels_like_c,
        obs.description,
        obs.humidity_pct,
        obs.wind_speed_kmh,
        marker,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_rows_are_marked() {
        let line = weather_line("Red Deer", &WeatherObservation::fallback());

        assert!(line.starts_with("Red Deer"));
        assert!(line.contains("20°C (feels 21°C)"));
        assert!(line.ends_with("[fallback]"));
    }

    #[test]
    fn live_rows_have_no_marker() {
        let obs = WeatherObservation {
            origin: ObservationOrigin::Live,
            ..WeatherObservation::fallback()
        };

        assert!(!weather_line("Calgary", &obs).contains('['));
    }
}
