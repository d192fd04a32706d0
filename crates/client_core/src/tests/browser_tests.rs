use shared::domain::CharacterId;

use super::*;

fn character(id: i64, name: &str, status: &str, species: &str) -> Character {
    Character {
        id: CharacterId(id),
        name: name.to_string(),
        status: status.to_string(),
        species: species.to_string(),
        image: format!("https://img.test/{id}.jpeg"),
    }
}

fn loaded(characters: Vec<Character>) -> BrowserState {
    let mut state = BrowserState::new();
    let generation = state.begin_load();
    assert!(state.finish_load(generation, Ok(characters)));
    state
}

fn numbered_batch(count: i64) -> Vec<Character> {
    (1..=count)
        .map(|id| character(id, &format!("character-{id:03}"), "Alive", "Human"))
        .collect()
}

fn ids(characters: &[Character]) -> Vec<i64> {
    characters.iter().map(|c| c.id.0).collect()
}

#[test]
fn search_matches_case_insensitively_and_is_idempotent() {
    let mut state = loaded(vec![
        character(1, "Rick Sanchez", "Alive", "Human"),
        character(2, "Morty Smith", "Alive", "Human"),
        character(3, "Birdperson", "Dead", "Bird-Person"),
    ]);

    state.apply_search("RICK");
    let once = state.visible();
    state.apply_search("RICK");
    let twice = state.visible();

    assert_eq!(ids(&once), vec![1]);
    assert_eq!(once, twice);
}

#[test]
fn status_filter_selects_exact_matches_and_all_restores() {
    let mut state = loaded(vec![
        character(1, "Rick Sanchez", "Alive", "Human"),
        character(2, "Birdperson", "Dead", "Bird-Person"),
    ]);

    state.apply_status_filter(StatusFilter::Only("Dead".to_string()));
    assert_eq!(ids(&state.visible()), vec![2]);

    state.apply_status_filter(StatusFilter::All);
    assert_eq!(ids(&state.visible()), vec![1, 2]);
}

#[test]
fn sort_orders_names_ascending() {
    let mut state = loaded(vec![
        character(1, "Morty", "Alive", "Human"),
        character(2, "Rick", "Alive", "Human"),
        character(3, "Beth", "Alive", "Human"),
    ]);

    state.apply_sort(SortKey::Name);

    let names: Vec<String> = state.visible().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Beth", "Morty", "Rick"]);
}

#[test]
fn search_and_status_filter_compose() {
    let mut state = loaded(vec![
        character(1, "Rick Sanchez", "Alive", "Human"),
        character(2, "Rick Prime", "Dead", "Human"),
        character(3, "Morty Smith", "Alive", "Human"),
    ]);

    state.apply_search("rick");
    state.apply_status_filter(StatusFilter::Only("Dead".to_string()));

    assert_eq!(ids(&state.visible()), vec![2]);
}

#[test]
fn sort_persists_across_filter_changes() {
    let mut state = loaded(vec![
        character(1, "Squanchy", "Dead", "Cat-Person"),
        character(2, "Birdperson", "Dead", "Bird-Person"),
        character(3, "Rick Sanchez", "Alive", "Human"),
    ]);

    state.apply_sort(SortKey::Name);
    state.apply_status_filter(StatusFilter::Only("Dead".to_string()));

    let names: Vec<String> = state.visible().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Birdperson", "Squanchy"]);
}

#[test]
fn pagination_boundary_clamps_and_slices() {
    let mut state = loaded(numbered_batch(23));

    assert_eq!(state.total_pages(), 3);

    state.go_to_page(4);
    assert_eq!(state.page_index(), 3);

    let last_page = state.visible_page();
    assert_eq!(ids(&last_page), vec![21, 22, 23]);
}

#[test]
fn prev_page_clamps_at_the_first_page() {
    let mut state = loaded(numbered_batch(23));

    state.prev_page();
    assert_eq!(state.page_index(), 1);
}

#[test]
fn page_size_change_leaves_page_index_alone() {
    let mut state = loaded(numbered_batch(23));
    state.go_to_page(3);

    state.set_page_size(100);

    // Deliberately out of range now; the derived page is just empty.
    assert_eq!(state.page_index(), 3);
    assert_eq!(state.total_pages(), 1);
    assert!(state.visible_page().is_empty());
}

#[test]
fn pages_concatenate_back_to_the_visible_set() {
    for page_size in [1, 5, 10, 23, 50] {
        let mut state = loaded(numbered_batch(23));
        state.set_page_size(page_size);

        let mut reconstructed = Vec::new();
        for page in 1..=state.total_pages() {
            state.go_to_page(page);
            reconstructed.extend(state.visible_page());
        }

        assert_eq!(reconstructed, state.visible(), "page_size {page_size}");
    }
}

#[test]
fn failed_load_keeps_the_prior_batch() {
    let mut state = loaded(numbered_batch(2));

    let generation = state.begin_load();
    assert!(state.finish_load(generation, Err(FetchError::new("boom"))));

    assert_eq!(state.all().len(), 2);
    assert!(matches!(state.phase(), LoadPhase::Error(_)));
}

#[test]
fn successful_load_replaces_the_batch_wholesale() {
    let mut state = loaded(numbered_batch(2));

    let generation = state.begin_load();
    assert!(state.finish_load(generation, Ok(vec![character(9, "Jerry", "Alive", "Human")])));

    assert_eq!(ids(state.all()), vec![9]);
    assert_eq!(*state.phase(), LoadPhase::Ready);
    assert!(state.loaded_at().is_some());
}

#[test]
fn stale_load_result_is_discarded() {
    let mut state = BrowserState::new();

    let first = state.begin_load();
    let second = state.begin_load();

    assert!(!state.finish_load(first, Ok(numbered_batch(5))));
    assert_eq!(*state.phase(), LoadPhase::Loading);
    assert!(state.all().is_empty());

    assert!(state.finish_load(second, Ok(numbered_batch(2))));
    assert_eq!(state.all().len(), 2);
    assert_eq!(*state.phase(), LoadPhase::Ready);
}

#[test]
fn begin_load_clears_a_prior_error() {
    let mut state = BrowserState::new();
    let generation = state.begin_load();
    state.finish_load(generation, Err(FetchError::new("boom")));

    state.begin_load();

    assert_eq!(*state.phase(), LoadPhase::Loading);
}

#[test]
fn selection_survives_a_reload() {
    let mut state = loaded(numbered_batch(3));
    let chosen = state.all()[1].clone();
    state.select(chosen.clone());

    let generation = state.begin_load();
    state.finish_load(generation, Ok(numbered_batch(1)));

    assert_eq!(state.selected(), Some(&chosen));
}

#[test]
fn empty_batch_still_has_one_page() {
    let state = BrowserState::new();

    assert_eq!(state.total_pages(), 1);
    assert!(state.visible_page().is_empty());
}
