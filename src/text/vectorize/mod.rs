//! Text vectorization: frozen vocabulary plus smoothed IDF weights.

mod tfidf_vectorizer;

pub use tfidf_vectorizer::{IdfWeights, TfidfVectorizer, Vocabulary};
