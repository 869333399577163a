use serde::{Deserialize, Serialize};

/// A movie record as returned by the OMDb `?t=` lookup.
///
/// Every field is optional upstream: a "not found" answer only carries
/// `Response` and `Error`, so all fields fall back to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Rated")]
    pub rated: String,
    #[serde(rename = "Released")]
    pub released: String,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Writer")]
    pub writer: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Awards")]
    pub awards: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Ratings")]
    pub ratings: Vec<Rating>,
    #[serde(rename = "Metascore")]
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "DVD")]
    pub dvd: String,
    #[serde(rename = "BoxOffice")]
    pub box_office: String,
    #[serde(rename = "Production")]
    pub production: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error")]
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Movie {
    /// OMDb reports a missing title inside a normal 200 body with
    /// `"Response": "False"`.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.response.eq_ignore_ascii_case("false")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_omdb_body() {
        let body = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Rated": "PG-13",
            "Released": "16 Jul 2010",
            "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Writer": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
            "Plot": "A thief who steals corporate secrets through dream-sharing technology.",
            "Language": "English, Japanese, French",
            "Country": "United States, United Kingdom",
            "Awards": "Won 4 Oscars. 159 wins & 220 nominations total",
            "Poster": "https://m.media-amazon.com/images/M/inception.jpg",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.8/10"},
                {"Source": "Rotten Tomatoes", "Value": "87%"}
            ],
            "Metascore": "74",
            "imdbRating": "8.8",
            "imdbVotes": "2,500,000",
            "imdbID": "tt1375666",
            "Type": "movie",
            "DVD": "07 Dec 2010",
            "BoxOffice": "$292,587,330",
            "Production": "N/A",
            "Website": "N/A",
            "Response": "True"
        }"#;

        let movie: Movie = serde_json::from_str(body).unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.imdb_id, "tt1375666");
        assert_eq!(movie.kind, "movie");
        assert_eq!(movie.ratings.len(), 2);
        assert_eq!(movie.ratings[1].value, "87%");
        assert!(movie.error.is_empty());
        assert!(movie.is_found());
    }

    #[test]
    fn decodes_not_found_body() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;

        let movie: Movie = serde_json::from_str(body).unwrap();
        assert!(!movie.is_found());
        assert_eq!(movie.error, "Movie not found!");
        assert!(movie.title.is_empty());
        assert!(movie.ratings.is_empty());
    }
}
