//! Descriptive statistics over housing records
//!
//! [`compute_statistics`] is a pure function: the same record sequence always
//! produces bit-identical output. Integer columns are summed exactly before
//! the final division; decimal columns are summed in record order.

use crate::record::HousingRecord;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for a housing dataset
///
/// `min_price`/`max_price` are `None` for an empty dataset so that "no data"
/// is never confused with a zero price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingStatistics {
    /// Number of records
    pub count: usize,
    /// Mean sale price
    pub average_price: f64,
    /// Lowest sale price
    pub min_price: Option<i32>,
    /// Highest sale price
    pub max_price: Option<i32>,
    /// Mean bedroom count
    pub average_bedrooms: f64,
    /// Mean bathroom count
    pub average_bathrooms: f64,
    /// Mean interior area
    pub average_square_footage: f64,
    /// Mean construction year
    pub average_year_built: f64,
    /// Mean lot area
    pub average_lot_size: f64,
    /// Mean distance to the city center
    pub average_distance_to_city_center: f64,
    /// Mean school rating
    pub average_school_rating: f64,
}

impl HousingStatistics {
    /// Statistics of an empty dataset
    #[must_use]
    pub fn empty() -> Self {
        Self {
            count: 0,
            average_price: 0.0,
            min_price: None,
            max_price: None,
            average_bedrooms: 0.0,
            average_bathrooms: 0.0,
            average_square_footage: 0.0,
            average_year_built: 0.0,
            average_lot_size: 0.0,
            average_distance_to_city_center: 0.0,
            average_school_rating: 0.0,
        }
    }
}

impl Default for HousingStatistics {
    fn default() -> Self {
        Self::empty()
    }
}

/// Compute statistics over `records`
#[must_use]
pub fn compute_statistics(records: &[HousingRecord]) -> HousingStatistics {
    if records.is_empty() {
        return HousingStatistics::empty();
    }

    HousingStatistics {
        count: records.len(),
        average_price: mean_exact(records, |r| i64::from(r.price)),
        min_price: records.iter().map(|r| r.price).min(),
        max_price: records.iter().map(|r| r.price).max(),
        average_bedrooms: mean_exact(records, |r| i64::from(r.bedrooms)),
        average_bathrooms: mean(records, |r| r.bathrooms),
        average_square_footage: mean_exact(records, |r| i64::from(r.square_footage)),
        average_year_built: mean_exact(records, |r| i64::from(r.year_built)),
        average_lot_size: mean_exact(records, |r| i64::from(r.lot_size)),
        average_distance_to_city_center: mean(records, |r| r.distance_to_city_center),
        average_school_rating: mean(records, |r| r.school_rating),
    }
}

/// Mean of an integer column, summed without rounding
#[allow(clippy::cast_precision_loss)]
fn mean_exact(records: &[HousingRecord], value: impl Fn(&HousingRecord) -> i64) -> f64 {
    let sum: i128 = records.iter().map(|r| i128::from(value(r))).sum();
    sum as f64 / records.len() as f64
}

#[allow(clippy::cast_precision_loss)]
fn mean(records: &[HousingRecord], value: impl Fn(&HousingRecord) -> f64) -> f64 {
    let sum: f64 = records.iter().map(value).sum();
    sum / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn record(id: i64, bedrooms: i32, bathrooms: f64, price: i32) -> HousingRecord {
        HousingRecord {
            id,
            square_footage: 1500,
            bedrooms,
            bathrooms,
            year_built: 2000,
            lot_size: 6000,
            distance_to_city_center: 2.5,
            school_rating: 8.0,
            price,
        }
    }

    #[test]
    fn empty_records_have_absent_extremes() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, HousingStatistics::empty());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.min_price, None);
        assert_eq!(stats.max_price, None);
        assert_eq!(stats.average_price, 0.0);
        assert_eq!(stats.average_school_rating, 0.0);
    }

    #[test]
    fn two_record_dataset() {
        let records = vec![
            HousingRecord {
                id: 1,
                square_footage: 1000,
                bedrooms: 2,
                bathrooms: 1.5,
                year_built: 1990,
                lot_size: 5000,
                distance_to_city_center: 3.2,
                school_rating: 7.5,
                price: 200_000,
            },
            HousingRecord {
                id: 2,
                square_footage: 2000,
                bedrooms: 3,
                bathrooms: 2.0,
                year_built: 2005,
                lot_size: 8000,
                distance_to_city_center: 1.1,
                school_rating: 9.0,
                price: 400_000,
            },
        ];

        let stats = compute_statistics(&records);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average_price, 300_000.0);
        assert_eq!(stats.min_price, Some(200_000));
        assert_eq!(stats.max_price, Some(400_000));
        assert_eq!(stats.average_bedrooms, 2.5);
        assert_eq!(stats.average_bathrooms, 1.75);
        assert_eq!(stats.average_square_footage, 1500.0);
        assert_eq!(stats.average_year_built, 1997.5);
        assert_eq!(stats.average_lot_size, 6500.0);
        assert_eq!(stats.average_school_rating, 8.25);
    }

    #[test]
    fn zero_price_is_reported_not_absent() {
        let stats = compute_statistics(&[record(1, 1, 1.0, 0)]);
        assert_eq!(stats.min_price, Some(0));
        assert_eq!(stats.max_price, Some(0));
    }

    #[test]
    fn large_prices_do_not_overflow() {
        let records = vec![record(1, 1, 1.0, i32::MAX), record(2, 1, 1.0, i32::MAX)];
        let stats = compute_statistics(&records);
        assert_eq!(stats.average_price, f64::from(i32::MAX));
    }

    #[test]
    fn empty_serializes_extremes_as_null() {
        let json = serde_json::to_value(HousingStatistics::empty()).unwrap();
        assert!(json["minPrice"].is_null());
        assert!(json["maxPrice"].is_null());
        assert_eq!(json["averagePrice"], 0.0);
    }

    proptest! {
        #[test]
        fn prop_statistics_are_deterministic(
            rows in proptest::collection::vec((0i32..10, 0u32..8, 0i32..2_000_000), 0..40)
        ) {
            let records: Vec<_> = rows
                .iter()
                .enumerate()
                .map(|(i, &(bed, bath, price))| record(i as i64, bed, f64::from(bath) * 0.5, price))
                .collect();

            let first = compute_statistics(&records);
            let second = compute_statistics(&records);
            prop_assert_eq!(first.average_price.to_bits(), second.average_price.to_bits());
            prop_assert_eq!(first.average_bathrooms.to_bits(), second.average_bathrooms.to_bits());
            prop_assert_eq!(&first, &second);
        }

        #[test]
        fn prop_average_price_within_extremes(
            prices in proptest::collection::vec(-1_000i32..5_000_000, 1..40)
        ) {
            let records: Vec<_> = prices
                .iter()
                .enumerate()
                .map(|(i, &price)| record(i as i64, 2, 1.0, price))
                .collect();

            let stats = compute_statistics(&records);
            let min = f64::from(stats.min_price.unwrap());
            let max = f64::from(stats.max_price.unwrap());
            prop_assert_eq!(stats.count, prices.len());
            prop_assert!(stats.average_price >= min && stats.average_price <= max);
        }
    }
}
