use std::collections::HashSet;

use crate::model::{City, CityList, Coordinate};

/// Collapse per-sample geocoding results into a [`CityList`].
///
/// Unresolved samples are skipped and the first sample to produce a name
/// owns it, so the output follows the route.
pub fn dedupe<I>(resolved: I) -> CityList
where
    I: IntoIterator<Item = (Coordinate, Option<String>)>,
{
    let mut seen = HashSet::new();
    let mut cities = Vec::new();

    for (coordinate, name) in resolved {
        let Some(name) = name else { continue };

        if seen.insert(name.clone()) {
            cities.push(City { name, coordinate });
        }
    }

    cities
}
