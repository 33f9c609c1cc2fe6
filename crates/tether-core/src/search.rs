//! Free-text contact search.
//!
//! A single word is looked up in first name, last name and nickname. Two or
//! more words are read as "first last", with the raw input also matched
//! against the nickname so multi-word nicknames stay findable.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactSearch {
    All,
    Term(String),
    Name {
        first: String,
        last: String,
        /// The search exactly as submitted, surrounding whitespace included.
        phrase: String,
    },
}

pub fn parse_search(input: &str) -> ContactSearch {
    let mut tokens = input.split_whitespace();
    let Some(first) = tokens.next() else {
        return ContactSearch::All;
    };

    match tokens.next() {
        None => ContactSearch::Term(first.to_string()),
        Some(second) => ContactSearch::Name {
            first: first.to_string(),
            last: second.to_string(),
            phrase: input.to_string(),
        },
    }
}
