//! Housing dataset row

use serde::{Deserialize, Serialize};

/// One row of the housing dataset
///
/// Column order in the CSV matches field order here. Integer columns are
/// 32-bit signed: negative values parse, values beyond `i32::MAX` do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingRecord {
    /// Row identifier, unique within the dataset
    pub id: i64,
    /// Interior area in square feet
    pub square_footage: i32,
    /// Bedroom count
    pub bedrooms: i32,
    /// Bathroom count (half baths allowed)
    pub bathrooms: f64,
    /// Construction year
    pub year_built: i32,
    /// Lot area in square feet
    pub lot_size: i32,
    /// Distance to the city center in miles
    pub distance_to_city_center: f64,
    /// School rating
    pub school_rating: f64,
    /// Sale price in dollars
    pub price: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_names() {
        let record = HousingRecord {
            id: 1,
            square_footage: 1000,
            bedrooms: 2,
            bathrooms: 1.5,
            year_built: 1990,
            lot_size: 5000,
            distance_to_city_center: 3.2,
            school_rating: 7.5,
            price: 200_000,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["squareFootage"], 1000);
        assert_eq!(json["yearBuilt"], 1990);
        assert_eq!(json["distanceToCityCenter"], 3.2);
        assert_eq!(json["price"], 200_000);
    }
}
