use rusqlite::types::Value;
use tether_core::{ContactSearch, Page};

pub(crate) const CONTACT_COLUMNS: &str = "id, first_name, last_name, nickname, city, how_we_met, linkedin_url, last_contacted, created_at, updated_at";

#[derive(Debug, Default, Clone)]
pub struct ContactQuery {
    pub search: Option<ContactSearch>,
    pub page: Page,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl ContactQuery {
    pub fn new(search: ContactSearch, page: Page) -> Self {
        Self {
            search: Some(search),
            page,
        }
    }

    /// Both sides go through the connection's `casefold` function, so the
    /// match ignores case beyond ASCII. It is unanchored once the term is
    /// wrapped in `%`. Terms are not escaped, so `%` and `_` typed by the
    /// user keep their wildcard meaning.
    pub fn to_sql(&self) -> SqlQuery {
        let mut params: Vec<Value> = Vec::new();
        let mut sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts");

        match &self.search {
            None | Some(ContactSearch::All) => {}
            Some(ContactSearch::Term(term)) => {
                sql.push_str(
                    " WHERE (casefold(first_name) LIKE casefold(?) OR casefold(last_name) LIKE casefold(?) OR casefold(nickname) LIKE casefold(?))",
                );
                let like = like_pattern(term);
                params.push(Value::from(like.clone()));
                params.push(Value::from(like.clone()));
                params.push(Value::from(like));
            }
            Some(ContactSearch::Name {
                first,
                last,
                phrase,
            }) => {
                sql.push_str(
                    " WHERE ((casefold(first_name) LIKE casefold(?) AND casefold(last_name) LIKE casefold(?)) OR casefold(nickname) LIKE casefold(?))",
                );
                params.push(Value::from(like_pattern(first)));
                params.push(Value::from(like_pattern(last)));
                params.push(Value::from(like_pattern(phrase)));
            }
        }

        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");
        params.push(Value::from(i64::from(self.page.limit)));
        params.push(Value::from(i64::from(self.page.offset)));

        SqlQuery { sql, params }
    }
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}
