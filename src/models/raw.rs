use serde::Deserialize;

/// One row of the Goodreads-style books CSV
///
/// Every field is kept as text; the extractor decides how to interpret it.
/// Columns missing from a row deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawRecord {
    #[serde(rename = "", default)]
    pub index: String,
    #[serde(rename = "Book", default)]
    pub title: String,
    #[serde(rename = "Author", default)]
    pub author: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Genres", default)]
    pub genres: String,
    #[serde(rename = "Avg_Rating", default)]
    pub average_rating: String,
    #[serde(rename = "Num_Ratings", default)]
    pub number_of_ratings: String,
    #[serde(rename = "URL", default)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_csv_row() {
        let data = "\
,Book,Author,Description,Genres,Avg_Rating,Num_Ratings,URL
0,Dune,Frank Herbert,Spice.,\"['Science Fiction']\",4.27,\"1,320,000\",https://example.org/dune
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<RawRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, "0");
        assert_eq!(rows[0].title, "Dune");
        assert_eq!(rows[0].genres, "['Science Fiction']");
        assert_eq!(rows[0].number_of_ratings, "1,320,000");
    }
}
