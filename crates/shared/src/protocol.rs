use serde::{Deserialize, Serialize};

use crate::domain::CharacterId;

/// One character record as the upstream collection endpoint returns it.
/// The endpoint sends more fields than these; everything else is ignored
/// on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub status: String,
    pub species: String,
    pub image: String,
}

/// Pagination envelope of the collection endpoint. `next` is null on the
/// last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upstream_page_and_ignores_extra_fields() {
        let raw = r#"{
            "info": { "count": 826, "pages": 42, "next": "https://example.test/api/character?page=2", "prev": null },
            "results": [
                {
                    "id": 1,
                    "name": "Rick Sanchez",
                    "status": "Alive",
                    "species": "Human",
                    "type": "",
                    "gender": "Male",
                    "origin": { "name": "Earth (C-137)", "url": "" },
                    "image": "https://example.test/api/character/avatar/1.jpeg",
                    "episode": ["https://example.test/api/episode/1"],
                    "created": "2017-11-04T18:48:46.250Z"
                }
            ]
        }"#;

        let page: CharacterPage = serde_json::from_str(raw).expect("decode page");
        assert_eq!(page.info.pages, 42);
        assert_eq!(page.info.prev, None);
        assert!(page.info.next.is_some());
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, CharacterId(1));
        assert_eq!(page.results[0].status, "Alive");
    }

    #[test]
    fn last_page_has_null_next() {
        let raw = r#"{
            "info": { "count": 2, "pages": 1, "next": null, "prev": null },
            "results": []
        }"#;

        let page: CharacterPage = serde_json::from_str(raw).expect("decode page");
        assert_eq!(page.info.next, None);
    }
}
