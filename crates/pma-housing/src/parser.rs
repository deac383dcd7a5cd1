//! Housing CSV parser
//!
//! Converts the raw dataset text into typed [`HousingRecord`]s.
//!
//! Row handling is deliberately asymmetric:
//! - rows with fewer than [`FIELD_COUNT`] fields are skipped
//! - a present field that fails numeric parsing aborts the whole parse
//!
//! The header line is skipped without being checked against [`COLUMNS`].

use crate::error::{HousingError, HousingResult};
use crate::record::HousingRecord;
use std::fmt::Display;
use std::str::FromStr;

/// Number of columns a data row must provide
pub const FIELD_COUNT: usize = 9;

/// Column names in positional order
pub const COLUMNS: [&str; FIELD_COUNT] = [
    "id",
    "squareFootage",
    "bedrooms",
    "bathrooms",
    "yearBuilt",
    "lotSize",
    "distanceToCityCenter",
    "schoolRating",
    "price",
];

/// Parser trait for turning dataset text into housing records
///
/// Implement this trait to substitute the parsing step, e.g. to count or
/// delay invocations in tests.
pub trait RecordParser: Send + Sync + 'static {
    /// Parse the full dataset text into records, in file order
    ///
    /// # Errors
    /// `HousingError::DataFormat` on the first malformed numeric field.
    fn parse(&self, content: &str) -> HousingResult<Vec<HousingRecord>>;
}

/// Comma-separated housing dataset parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRecordParser;

impl CsvRecordParser {
    /// Create new CSV parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RecordParser for CsvRecordParser {
    fn parse(&self, content: &str) -> HousingResult<Vec<HousingRecord>> {
        let mut records = Vec::new();

        for (index, line) in content.lines().enumerate().skip(1) {
            let fields = split_fields(line);
            if fields.len() < FIELD_COUNT {
                continue;
            }
            records.push(parse_row(&fields, index + 1)?);
        }

        tracing::debug!(records = records.len(), "parsed housing dataset");
        Ok(records)
    }
}

/// Decode raw dataset bytes as UTF-8
///
/// # Errors
/// `HousingError::DataFormat` (line 0, column `encoding`) on invalid UTF-8.
pub fn decode(bytes: &[u8]) -> HousingResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        HousingError::data_format(0, "encoding", String::new(), e.to_string())
    })
}

/// Split a line on commas, dropping trailing empty fields
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_row(fields: &[&str], line: usize) -> HousingResult<HousingRecord> {
    Ok(HousingRecord {
        id: field(fields, 0, line)?,
        square_footage: field(fields, 1, line)?,
        bedrooms: field(fields, 2, line)?,
        bathrooms: field(fields, 3, line)?,
        year_built: field(fields, 4, line)?,
        lot_size: field(fields, 5, line)?,
        distance_to_city_center: field(fields, 6, line)?,
        school_rating: field(fields, 7, line)?,
        price: field(fields, 8, line)?,
    })
}

fn field<T>(fields: &[&str], index: usize, line: usize) -> HousingResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = fields[index].trim();
    raw.parse()
        .map_err(|e: T::Err| HousingError::data_format(line, COLUMNS[index], raw, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str =
        "id,squareFootage,bedrooms,bathrooms,yearBuilt,lotSize,distanceToCityCenter,schoolRating,price";

    fn parse(body: &str) -> HousingResult<Vec<HousingRecord>> {
        CsvRecordParser::new().parse(&format!("{HEADER}\n{body}"))
    }

    #[test]
    fn parses_rows_in_order() {
        let records = parse(
            "1,1000,2,1.5,1990,5000,3.2,7.5,200000\n2,2000,3,2.0,2005,8000,1.1,9.0,400000",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
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
            }
        );
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn header_only_yields_no_records() {
        let records = CsvRecordParser::new().parse(HEADER).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn empty_input_yields_no_records() {
        let records = CsvRecordParser::new().parse("").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn header_is_not_validated() {
        let records = CsvRecordParser::new()
            .parse("not,a,real,header\n1,1000,2,1.5,1990,5000,3.2,7.5,200000")
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn short_rows_are_skipped() {
        let records = parse(
            "1,1000,2,1.5,1990,5000,3.2,7.5\n2,2000,3,2.0,2005,8000,1.1,9.0,400000\n\n",
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);
    }

    #[test]
    fn trailing_empty_field_does_not_count() {
        let records = parse("1,1000,2,1.5,1990,5000,3.2,7.5,").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let records = parse("1,1000,2,1.5,1990,5000,3.2,7.5,200000,extra,more").unwrap();
        assert_eq!(records[0].price, 200_000);
    }

    #[test]
    fn fields_are_trimmed() {
        let records = parse(" 7 , 1200 ,3, 2.5 ,2001, 6000 , 4.0 , 8.5 , 350000 ").unwrap();
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].price, 350_000);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let content = format!("{HEADER}\r\n1,1000,2,1.5,1990,5000,3.2,7.5,200000\r\n");
        let records = CsvRecordParser::new().parse(&content).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn non_numeric_price_fails_whole_parse() {
        let err = parse(
            "1,1000,2,1.5,1990,5000,3.2,7.5,200000\n2,2000,3,2.0,2005,8000,1.1,9.0,abc\n3,900,1,1.0,1970,3000,5.0,6.0,150000",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            HousingError::DataFormat { line: 3, column: "price", ref value, .. } if value == "abc"
        ));
    }

    #[test]
    fn decimal_in_integer_column_fails() {
        let err = parse("1,1000.5,2,1.5,1990,5000,3.2,7.5,200000").unwrap_err();
        assert!(matches!(err, HousingError::DataFormat { column: "squareFootage", .. }));
    }

    #[test]
    fn negative_values_parse_in_every_column() {
        let records = parse("1,-1000,-2,-1.5,1990,-5000,-3.2,7.5,-200000").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].square_footage, -1000);
        assert_eq!(records[0].bedrooms, -2);
        assert_eq!(records[0].bathrooms, -1.5);
        assert_eq!(records[0].lot_size, -5000);
        assert_eq!(records[0].distance_to_city_center, -3.2);
        assert_eq!(records[0].price, -200_000);
    }

    #[test]
    fn integer_beyond_32_bits_fails() {
        let err = parse("1,1000,2,1.5,1990,5000,3.2,7.5,3000000000").unwrap_err();
        assert!(matches!(
            err,
            HousingError::DataFormat { column: "price", ref value, .. } if value == "3000000000"
        ));

        let records = parse("1,1000,2,1.5,1990,5000,3.2,7.5,2147483647").unwrap();
        assert_eq!(records[0].price, i32::MAX);
    }

    #[test]
    fn empty_field_inside_row_fails() {
        let err = parse("1,1000,2,,1990,5000,3.2,7.5,200000").unwrap_err();
        assert!(matches!(err, HousingError::DataFormat { column: "bathrooms", .. }));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = decode(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, HousingError::DataFormat { line: 0, column: "encoding", .. }));
    }
}
