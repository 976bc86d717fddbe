//! Static lookup tables: unit→region assignment and map centroids.
//!
//! These are process-wide immutable configuration, constructed explicitly
//! and passed into the normalizer/chart builder rather than read from
//! ambient globals, so tests can substitute fixtures.

use crate::models::Region;
use std::collections::BTreeMap;

/// Unit→region assignment for the federative units.
#[derive(Debug, Clone)]
pub struct RegionTable {
    map: BTreeMap<String, Region>,
}

impl RegionTable {
    /// The production table: all 27 federative units across the 5 regions.
    pub fn brazil() -> Self {
        use Region::*;
        let pairs: [(&str, Region); 27] = [
            ("Acre", Norte),
            ("Amapá", Norte),
            ("Amazonas", Norte),
            ("Pará", Norte),
            ("Rondônia", Norte),
            ("Roraima", Norte),
            ("Tocantins", Norte),
            ("Alagoas", Nordeste),
            ("Bahia", Nordeste),
            ("Ceará", Nordeste),
            ("Maranhão", Nordeste),
            ("Paraíba", Nordeste),
            ("Pernambuco", Nordeste),
            ("Piauí", Nordeste),
            ("Rio Grande do Norte", Nordeste),
            ("Sergipe", Nordeste),
            ("Distrito Federal", CentroOeste),
            ("Goiás", CentroOeste),
            ("Mato Grosso", CentroOeste),
            ("Mato Grosso do Sul", CentroOeste),
            ("Espírito Santo", Sudeste),
            ("Minas Gerais", Sudeste),
            ("Rio de Janeiro", Sudeste),
            ("São Paulo", Sudeste),
            ("Paraná", Sul),
            ("Rio Grande do Sul", Sul),
            ("Santa Catarina", Sul),
        ];
        Self::from_pairs(pairs.iter().map(|(u, r)| (u.to_string(), *r)))
    }

    /// Build a table from arbitrary pairs (test fixtures).
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Region)>,
    {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    pub fn region_of(&self, unit: &str) -> Option<Region> {
        self.map.get(unit).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::brazil()
    }
}

/// Centroid lookup keyed by unit or region name, used by the geographic
/// chart kind. A key absent from the table is reported as *unlocated* by the
/// chart builder; it is never mapped to (0, 0).
#[derive(Debug, Clone)]
pub struct CentroidTable {
    map: BTreeMap<String, (f64, f64)>,
}

impl CentroidTable {
    /// Approximate (lat, lon) centroids of the 27 federative units.
    pub fn brazil_units() -> Self {
        let pairs: [(&str, (f64, f64)); 27] = [
            ("Acre", (-9.02, -70.81)),
            ("Alagoas", (-9.57, -36.78)),
            ("Amapá", (1.41, -51.77)),
            ("Amazonas", (-3.42, -65.86)),
            ("Bahia", (-12.58, -41.70)),
            ("Ceará", (-5.50, -39.32)),
            ("Distrito Federal", (-15.80, -47.86)),
            ("Espírito Santo", (-19.18, -40.31)),
            ("Goiás", (-15.83, -49.84)),
            ("Maranhão", (-4.96, -45.27)),
            ("Mato Grosso", (-12.68, -56.92)),
            ("Mato Grosso do Sul", (-20.77, -54.79)),
            ("Minas Gerais", (-18.51, -44.56)),
            ("Pará", (-3.90, -52.48)),
            ("Paraíba", (-7.24, -36.72)),
            ("Paraná", (-24.89, -51.55)),
            ("Pernambuco", (-8.81, -36.95)),
            ("Piauí", (-7.72, -42.73)),
            ("Rio de Janeiro", (-22.25, -42.66)),
            ("Rio Grande do Norte", (-5.40, -36.95)),
            ("Rio Grande do Sul", (-29.84, -53.77)),
            ("Rondônia", (-11.51, -63.58)),
            ("Roraima", (2.74, -62.08)),
            ("Santa Catarina", (-27.24, -50.22)),
            ("São Paulo", (-22.01, -48.79)),
            ("Sergipe", (-10.57, -37.39)),
            ("Tocantins", (-10.17, -48.33)),
        ];
        Self::from_pairs(pairs.iter().map(|(k, c)| (k.to_string(), *c)))
    }

    /// Approximate (lat, lon) centroids of the 5 macro-regions.
    pub fn brazil_regions() -> Self {
        let pairs: [(&str, (f64, f64)); 5] = [
            ("Norte", (-4.50, -61.50)),
            ("Nordeste", (-8.50, -40.50)),
            ("Centro-Oeste", (-15.50, -53.00)),
            ("Sudeste", (-20.50, -45.00)),
            ("Sul", (-27.50, -51.50)),
        ];
        Self::from_pairs(pairs.iter().map(|(k, c)| (k.to_string(), *c)))
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, (f64, f64))>,
    {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    pub fn centroid_of(&self, key: &str) -> Option<(f64, f64)> {
        self.map.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brazil_region_table_is_total_over_the_27_units() {
        let table = RegionTable::brazil();
        assert_eq!(table.len(), 27);
        let centroids = CentroidTable::brazil_units();
        assert_eq!(centroids.len(), 27);
        // Every unit with a region also has a centroid.
        for unit in ["Acre", "São Paulo", "Distrito Federal", "Rio Grande do Norte"] {
            assert!(table.region_of(unit).is_some(), "{unit} missing region");
            assert!(centroids.centroid_of(unit).is_some(), "{unit} missing centroid");
        }
    }

    #[test]
    fn region_centroids_cover_all_region_names() {
        let centroids = CentroidTable::brazil_regions();
        for region in Region::ALL {
            assert!(centroids.centroid_of(region.name()).is_some());
        }
    }

    #[test]
    fn unknown_unit_resolves_to_none() {
        let table = RegionTable::brazil();
        assert_eq!(table.region_of("Atlantis"), None);
    }
}
