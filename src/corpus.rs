use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static CORPUS_DIR: Dir = include_dir!("src/corpus");

#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct Corpus {
    pub name: String,
    pub size: u32,
    pub texts: Vec<String>,
}

impl Corpus {
    pub fn new(file_name: String) -> Self {
        read_corpus_from_file(format!("{file_name}.json")).unwrap()
    }

    /// One reference text, chosen uniformly.
    pub fn pick(&self) -> String {
        self.texts
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

fn read_corpus_from_file(file_name: String) -> Result<Corpus, Box<dyn Error>> {
    let file = CORPUS_DIR
        .get_file(file_name)
        .expect("Corpus file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let corpus = from_str(file_as_str).expect("Unable to deserialize corpus json");

    Ok(corpus)
}
