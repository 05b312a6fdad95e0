use reelify_models::{genre_name, GenreRef, Mood, Movie, MovieId};

/// Static local catalog, used whenever TMDB is unreachable or returns nothing.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
}

struct Entry {
    id: u64,
    title: &'static str,
    original_title: &'static str,
    year: u16,
    duration: u32,
    rating: f64,
    genres: &'static [&'static str],
    overview: &'static str,
    keywords: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1,
        title: "Esaretin Bedeli",
        original_title: "The Shawshank Redemption",
        year: 1994,
        duration: 142,
        rating: 9.3,
        genres: &["Drama", "Crime"],
        overview: "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
        keywords: &["prison", "hope", "friendship", "hapishane", "umut"],
    },
    Entry {
        id: 2,
        title: "Yeşil Yol",
        original_title: "The Green Mile",
        year: 1999,
        duration: 189,
        rating: 8.6,
        genres: &["Drama", "Fantasy", "Crime"],
        overview: "A death row guard discovers that one of his prisoners has a miraculous gift.",
        keywords: &["prison", "miracle", "emotional", "duygusal", "mucize"],
    },
    Entry {
        id: 3,
        title: "Titanik",
        original_title: "Titanic",
        year: 1997,
        duration: 194,
        rating: 7.9,
        genres: &["Drama", "Romance"],
        overview: "A seventeen-year-old aristocrat falls in love with a kind but poor artist aboard the ill-fated R.M.S. Titanic.",
        keywords: &["ship", "love", "tragedy", "gemi", "aşk"],
    },
    Entry {
        id: 4,
        title: "Felekten Bir Gece",
        original_title: "The Hangover",
        year: 2009,
        duration: 100,
        rating: 7.7,
        genres: &["Comedy"],
        overview: "Three buddies wake up from a bachelor party in Las Vegas with no memory of the previous night and the groom missing.",
        keywords: &["vegas", "party", "friends", "parti", "komedi"],
    },
    Entry {
        id: 5,
        title: "Deadpool",
        original_title: "Deadpool",
        year: 2016,
        duration: 108,
        rating: 8.0,
        genres: &["Action", "Comedy", "Adventure"],
        overview: "A wisecracking mercenary gets experimented on and becomes immortal but ugly, and sets out to track down the man who ruined his looks.",
        keywords: &["superhero", "marvel", "antihero", "süper kahraman"],
    },
    Entry {
        id: 6,
        title: "Korku Seansı",
        original_title: "The Conjuring",
        year: 2013,
        duration: 112,
        rating: 7.5,
        genres: &["Horror", "Thriller"],
        overview: "Paranormal investigators work to help a family terrorized by a dark presence in their farmhouse.",
        keywords: &["haunted", "ghost", "paranormal", "hayalet", "korku"],
    },
    Entry {
        id: 7,
        title: "Kapan",
        original_title: "Get Out",
        year: 2017,
        duration: 104,
        rating: 7.7,
        genres: &["Horror", "Mystery", "Thriller"],
        overview: "A young African-American visits his white girlfriend's parents for the weekend, where his uneasiness eventually reaches a boiling point.",
        keywords: &["hypnosis", "suspense", "gerilim", "korku"],
    },
    Entry {
        id: 8,
        title: "Matrix",
        original_title: "The Matrix",
        year: 1999,
        duration: 136,
        rating: 8.7,
        genres: &["Action", "Science Fiction"],
        overview: "A computer hacker learns from mysterious rebels about the true nature of his reality and his role in the war against its controllers.",
        keywords: &["hacker", "simulation", "virtual reality", "simülasyon", "aksiyon"],
    },
    Entry {
        id: 9,
        title: "Kara Şövalye",
        original_title: "The Dark Knight",
        year: 2008,
        duration: 152,
        rating: 9.0,
        genres: &["Action", "Crime", "Drama"],
        overview: "Batman faces the Joker, a criminal mastermind who wants to plunge Gotham City into anarchy.",
        keywords: &["batman", "joker", "superhero", "süper kahraman", "aksiyon"],
    },
    Entry {
        id: 10,
        title: "Not Defteri",
        original_title: "The Notebook",
        year: 2004,
        duration: 123,
        rating: 7.8,
        genres: &["Romance", "Drama"],
        overview: "A poor yet passionate young man falls in love with a rich young woman, giving her a sense of freedom, but they are soon separated.",
        keywords: &["love", "letters", "memory", "aşk", "romantik"],
    },
    Entry {
        id: 11,
        title: "Aşıklar Şehri",
        original_title: "La La Land",
        year: 2016,
        duration: 128,
        rating: 8.0,
        genres: &["Comedy", "Drama", "Romance", "Music"],
        overview: "While navigating their careers in Los Angeles, a pianist and an actress fall in love while attempting to reconcile their aspirations.",
        keywords: &["musical", "jazz", "dream", "müzikal", "aşk"],
    },
    Entry {
        id: 12,
        title: "Başlangıç",
        original_title: "Inception",
        year: 2010,
        duration: 148,
        rating: 8.8,
        genres: &["Action", "Science Fiction", "Adventure"],
        overview: "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea into a mind.",
        keywords: &["dream", "heist", "mind", "rüya", "bilim kurgu"],
    },
    Entry {
        id: 13,
        title: "Coco",
        original_title: "Coco",
        year: 2017,
        duration: 105,
        rating: 8.4,
        genres: &["Animation", "Family", "Music"],
        overview: "Aspiring musician Miguel enters the Land of the Dead to find his great-great-grandfather, a legendary singer.",
        keywords: &["family", "music", "pixar", "aile", "animasyon"],
    },
    Entry {
        id: 14,
        title: "Er Ryan'ı Kurtarmak",
        original_title: "Saving Private Ryan",
        year: 1998,
        duration: 169,
        rating: 8.6,
        genres: &["Drama", "History", "War"],
        overview: "Following the Normandy landings, a group of soldiers go behind enemy lines to retrieve a paratrooper whose brothers have been killed in action.",
        keywords: &["world war", "normandy", "soldier", "savaş", "tarih"],
    },
];

impl Entry {
    fn to_movie(&self) -> Movie {
        Movie {
            id: MovieId::local(self.id),
            title: self.title.to_string(),
            original_title: self.original_title.to_string(),
            year: Some(self.year),
            duration_minutes: self.duration,
            rating: Some(self.rating),
            imdb_rating: Some(self.rating),
            poster_url: None,
            backdrop_url: None,
            overview: self.overview.to_string(),
            genres: self.genres.iter().map(|g| GenreRef::named(*g)).collect(),
            reason: None,
            trailer_key: None,
            platforms: None,
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Catalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        Self::from_movies(ENTRIES.iter().map(Entry::to_movie).collect())
    }

    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn empty() -> Self {
        Self::from_movies(Vec::new())
    }

    pub fn all(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn find(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| &m.id == id)
    }

    /// Case-insensitive match on title, original title or any keyword
    pub fn search(&self, query: &str) -> Vec<Movie> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.movies
            .iter()
            .filter(|m| {
                m.title.to_lowercase().contains(&needle)
                    || m.original_title.to_lowercase().contains(&needle)
                    || m.keywords.iter().any(|k| k.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Entries carrying the mood's discovery genre
    pub fn for_mood(&self, mood: Mood) -> Vec<Movie> {
        let code = mood.genre_code();
        self.movies
            .iter()
            .filter(|m| m.genres.iter().any(|g| genre_matches(g, code)))
            .cloned()
            .collect()
    }

    /// Highest rated first, at most `n` entries. Ties keep catalog order.
    pub fn top_rated(&self, n: usize) -> Vec<Movie> {
        let mut sorted: Vec<Movie> = self.movies.clone();
        sorted.sort_by(|a, b| {
            let ra = a.rating.unwrap_or_default();
            let rb = b.rating.unwrap_or_default();
            rb.total_cmp(&ra)
        });
        sorted.truncate(n);
        sorted
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn genre_matches(genre: &GenreRef, code: u32) -> bool {
    match genre {
        GenreRef::Code(c) => *c == code,
        GenreRef::Named(name) => genre_name(code)
            .map(|expected| expected.eq_ignore_ascii_case(name))
            .unwrap_or(false),
    }
}
