use super::*;

fn ids(items: &[SourceItem]) -> Vec<&str> {
    items.iter().map(|i| i.external_id.as_str()).collect()
}

#[test]
fn test_extract_title_id_normalizes() {
    assert_eq!(extract_title_id("/title/tt0113277/"), Some("tt0113277".to_string()));
    assert_eq!(extract_title_id("https://www.imdb.com/title/TT0113277?ref_=ls"), Some("tt0113277".to_string()));
    assert_eq!(extract_title_id("/name/nm0000158/"), None);
    assert_eq!(extract_title_id("/title/"), None);
}

#[test]
fn test_anchor_text_titles_in_page_order() {
    let html = r#"
        <html><body>
          <a href="/title/tt0113277/">Heat</a>
          <a href="/title/tt0944947/?ref_=ls_t">Game of Thrones</a>
          <a href="/name/nm0000158/">Tom Hanks</a>
          <a href="/title/tt0111161/">The Shawshank Redemption</a>
        </body></html>
    "#;

    let items = parse_list_page(html);
    assert_eq!(ids(&items), vec!["tt0113277", "tt0944947", "tt0111161"]);
    assert_eq!(items[0].title, "Heat");
    assert_eq!(items[1].title, "Game of Thrones");
    assert_eq!(items[1].source_url, "https://www.imdb.com/title/tt0944947/");
}

#[test]
fn test_duplicates_collapse_across_case_and_trailing_slash() {
    let html = r#"
        <a href="/title/tt0113277">Heat</a>
        <a href="/title/TT0113277/">Heat (poster)</a>
        <a href="https://www.imdb.com/title/tt0113277/?ref_=x">Heat again</a>
    "#;

    let items = parse_list_page(html);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].external_id, "tt0113277");
    assert_eq!(items[0].title, "Heat");
}

#[test]
fn test_short_anchor_falls_back_to_container_heading() {
    let html = r#"
        <div class="lister-item">
          <a href="/title/tt0133093/"><img alt="poster"></a>
          <div class="content">
            <h3>The Matrix <span>(1999)</span></h3>
          </div>
        </div>
    "#;

    let items = parse_list_page(html);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "The Matrix (1999)");
}

#[test]
fn test_short_anchor_falls_back_to_sibling_title_link() {
    let html = r#"
        <li class="ipc-metadata-list-summary-item">
          <a href="/title/tt0468569/">x</a>
          <a href="/title/tt0468569/?ref_=t">The Dark Knight</a>
        </li>
    "#;

    let items = parse_list_page(html);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "The Dark Knight");
}

#[test]
fn test_placeholder_title_without_heading() {
    let html = r#"
        <div><a href="/title/tt7286456/"></a><span>no heading here</span></div>
        <a href="/title/tt1375666/">?</a>
    "#;

    let items = parse_list_page(html);
    assert_eq!(ids(&items), vec!["tt7286456", "tt1375666"]);
    assert_eq!(items[0].title, "ID:tt7286456");
    assert_eq!(items[1].title, "ID:tt1375666");
}

#[test]
fn test_structured_data_adds_unseen_items_after_anchors() {
    let html = r#"
        <html><head>
        <script type="application/ld+json">
        {
          "@type": "ItemList",
          "itemListElement": [
            {"@type": "ListItem", "position": 1, "item": {"url": "https://www.imdb.com/title/tt0113277/", "name": "Heat (1995)"}},
            {"@type": "ListItem", "position": 2, "item": {"url": "https://www.imdb.com/title/tt0082971/", "name": "Raiders of the Lost Ark"}},
            {"@type": "ListItem", "position": 3, "item": {"url": "https://www.imdb.com/title/tt0090605/"}}
          ]
        }
        </script>
        </head><body>
          <a href="/title/tt0113277/">Heat</a>
        </body></html>
    "#;

    let items = parse_list_page(html);
    assert_eq!(ids(&items), vec!["tt0113277", "tt0082971", "tt0090605"]);
    // The anchor saw tt0113277 first, so its title wins
    assert_eq!(items[0].title, "Heat");
    assert_eq!(items[1].title, "Raiders of the Lost Ark");
    assert_eq!(items[2].title, "ID:tt0090605");
}

#[test]
fn test_structured_data_array_and_bare_urls() {
    let html = r#"
        <script type="application/ld+json">
        [{"itemListElement": [
            {"item": "https://www.imdb.com/title/tt0076759/", "name": "Star Wars"},
            {"url": "https://www.imdb.com/title/tt0080684/", "name": "  "}
        ]}]
        </script>
    "#;

    let items = parse_list_page(html);
    assert_eq!(ids(&items), vec!["tt0076759", "tt0080684"]);
    assert_eq!(items[0].title, "Star Wars");
    assert_eq!(items[1].title, "ID:tt0080684");
}

#[test]
fn test_structured_data_entry_with_odd_name_keeps_its_id() {
    let html = r#"
        <script type="application/ld+json">
        {"itemListElement": [
            {"item": {"url": "https://www.imdb.com/title/tt0076759/", "name": "Star Wars"}},
            {"item": {"url": "https://www.imdb.com/title/tt0080684/", "name": ["The Empire Strikes Back"]}},
            {"item": 42},
            {"item": {"url": "https://www.imdb.com/title/tt0086190/", "name": "Return of the Jedi"}}
        ]}
        </script>
    "#;

    let items = parse_list_page(html);
    assert_eq!(ids(&items), vec!["tt0076759", "tt0080684", "tt0086190"]);
    assert_eq!(items[0].title, "Star Wars");
    assert_eq!(items[1].title, "ID:tt0080684");
    assert_eq!(items[2].title, "Return of the Jedi");
}

#[test]
fn test_malformed_structured_data_is_ignored() {
    let html = r#"
        <script type="application/ld+json">{ this is not json </script>
        <script type="application/ld+json">{"@type": "Movie", "name": "No list here"}</script>
        <a href="/title/tt0113277/">Heat</a>
    "#;

    let items = parse_list_page(html);
    assert_eq!(ids(&items), vec!["tt0113277"]);
}

#[test]
fn test_n_distinct_references_yield_n_items() {
    let mut html = String::from("<ul>");
    for n in 0..25 {
        html.push_str(&format!(r#"<li><a href="/title/tt{:07}/">Title {}</a></li>"#, n, n));
        // every title also appears a second time as a poster link
        html.push_str(&format!(r#"<li><a href="/title/tt{:07}/"></a></li>"#, n));
    }
    html.push_str("</ul>");

    let items = parse_list_page(&html);
    assert_eq!(items.len(), 25);
    let unique: HashSet<&str> = ids(&items).into_iter().collect();
    assert_eq!(unique.len(), 25);
    assert_eq!(items[0].external_id, "tt0000000");
    assert_eq!(items[24].external_id, "tt0000024");
}

#[test]
fn test_empty_and_garbage_input() {
    assert!(parse_list_page("").is_empty());
    assert!(parse_list_page("<<<not html>>>").is_empty());
}
