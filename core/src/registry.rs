//! Static registry of monitored Spanish cities.
//!
//! Constant for the process lifetime; coordinates are illustrative site
//! anchors, not surveyed station positions.

/// One monitored city: display name plus WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

const fn city(name: &'static str, latitude: f64, longitude: f64) -> City {
    City {
        name,
        latitude,
        longitude,
    }
}

pub const SPAIN_CITIES: &[City] = &[
    city("Madrid", 40.4168, -3.7038),
    city("Barcelona", 41.3874, 2.1686),
    city("Valencia", 39.4699, -0.3763),
    city("Sevilla", 37.3891, -5.9845),
    city("Zaragoza", 41.6488, -0.8891),
    city("Málaga", 36.7213, -4.4214),
    city("Murcia", 37.9922, -1.1307),
    city("Palma", 39.5696, 2.6502),
    city("Las Palmas", 28.1235, -15.4363),
    city("Bilbao", 43.2630, -2.9350),
    city("Alicante", 38.3452, -0.4810),
    city("Córdoba", 37.8882, -4.7794),
    city("Valladolid", 41.6523, -4.7245),
    city("Vigo", 42.2406, -8.7207),
    city("Gijón", 43.5322, -5.6611),
    city("A Coruña", 43.3623, -8.4115),
    city("Vitoria-Gasteiz", 42.8467, -2.6716),
    city("Granada", 37.1773, -3.5986),
    city("Elche", 38.2699, -0.7126),
    city("Oviedo", 43.3614, -5.8593),
    city("Santa Cruz de Tenerife", 28.4636, -16.2518),
    city("Badalona", 41.4500, 2.2474),
    city("Cartagena", 37.6257, -0.9966),
    city("Terrassa", 41.5610, 2.0089),
    city("Jerez de la Frontera", 36.6850, -6.1261),
    city("Sabadell", 41.5486, 2.1075),
    city("Móstoles", 40.3223, -3.8649),
    city("Alcalá de Henares", 40.4818, -3.3643),
    city("Pamplona", 42.8125, -1.6458),
    city("Fuenlabrada", 40.2842, -3.7942),
    city("Almería", 36.8340, -2.4637),
    city("Leganés", 40.3272, -3.7635),
    city("San Sebastián", 43.3183, -1.9812),
    city("Getafe", 40.3083, -3.7327),
    city("Burgos", 42.3439, -3.6969),
    city("Albacete", 38.9943, -1.8585),
    city("Santander", 43.4623, -3.8100),
    city("Castellón de la Plana", 39.9864, -0.0513),
    city("Logroño", 42.4627, -2.4449),
    city("Badajoz", 38.8794, -6.9707),
    city("Salamanca", 40.9701, -5.6635),
    city("Huelva", 37.2614, -6.9447),
    city("Marbella", 36.5101, -4.8825),
    city("Lleida", 41.6176, 0.6200),
    city("Tarragona", 41.1189, 1.2445),
    city("León", 42.5987, -5.5671),
    city("Cádiz", 36.5271, -6.2886),
    city("Jaén", 37.7796, -3.7849),
    city("Ourense", 42.3358, -7.8639),
    city("Girona", 41.9794, 2.8214),
    city("Lugo", 43.0097, -7.5568),
    city("Cáceres", 39.4753, -6.3724),
    city("Santiago de Compostela", 42.8782, -8.5448),
    city("Melilla", 35.2923, -2.9381),
    city("Ceuta", 35.8894, -5.3198),
    city("Guadalajara", 40.6333, -3.1669),
    city("Toledo", 39.8628, -4.0273),
    city("Pontevedra", 42.4310, -8.6444),
    city("Palencia", 42.0096, -4.5288),
    city("Ciudad Real", 38.9848, -3.9274),
    city("Zamora", 41.5034, -5.7442),
    city("Ávila", 40.6565, -4.6818),
    city("Cuenca", 40.0704, -2.1374),
    city("Huesca", 42.1401, -0.4089),
    city("Segovia", 40.9429, -4.1088),
    city("Soria", 41.7636, -2.4649),
    city("Teruel", 40.3440, -1.1069),
    city("Mérida", 38.9161, -6.3437),
    city("Benidorm", 38.5342, -0.1314),
    city("Ibiza", 38.9067, 1.4206),
];

/// Names the region a coordinate belongs to: the nearest registry city
/// within roughly two degrees, otherwise the country-level fallback.
pub fn region_for(latitude: f64, longitude: f64) -> &'static str {
    SPAIN_CITIES
        .iter()
        .map(|c| {
            let d_lat = c.latitude - latitude;
            let d_lon = c.longitude - longitude;
            (c, (d_lat * d_lat + d_lon * d_lon).sqrt())
        })
        .filter(|(_, distance)| *distance < 2.0)
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(c, _)| c.name)
        .unwrap_or("España")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_the_expected_city_count() {
        assert_eq!(SPAIN_CITIES.len(), 70);
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<&str> = SPAIN_CITIES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SPAIN_CITIES.len());
    }

    #[test]
    fn region_lookup_snaps_to_the_nearest_city() {
        // A point a few hundredths of a degree off central Madrid.
        assert_eq!(region_for(40.40, -3.70), "Madrid");
    }

    #[test]
    fn region_lookup_falls_back_outside_spain() {
        assert_eq!(region_for(52.52, 13.40), "España");
    }
}
