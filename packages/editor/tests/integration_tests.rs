//! End-to-end scenarios: load a legacy post, edit it, derive its text

use folio_editor::{
    extract_text, normalize, BlockFactory, BlockId, Mutation, Post, SequencePath,
    SequentialIdGenerator,
};

fn post(json: &str) -> Post {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_double_encoded_post() {
    let legacy = post(
        r#"{
            "id": "1",
            "title": "Legacy",
            "blocks": "[{\"id\":1,\"type\":\"paragraph\",\"content\":\"hi\"}]",
            "content": "[{\"id\":1,\"type\":\"paragraph\",\"content\":\"hi\"}]",
            "image": null,
            "date": "2021-03-04",
            "sectionId": 2
        }"#,
    );

    let (changed, migrated) = normalize(legacy);

    assert!(changed);
    assert_eq!(migrated.blocks().map(Vec::len), Some(1));
    assert_eq!(migrated.content, "hi");
    assert_eq!(migrated.date, "2021-03-04");
    assert_eq!(migrated.section_id, Some(2));
}

#[test]
fn test_pre_block_post() {
    let legacy = post(
        r#"{"id":"2","title":"Old","blocks":null,"content":"[{\"id\":2,\"type\":\"heading\",\"level\":2,\"content\":\"Title\"}]"}"#,
    );

    let (changed, migrated) = normalize(legacy);

    assert!(changed);
    assert_eq!(migrated.content, "Title");
    let blocks = migrated.blocks().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind().as_str(), "heading");
}

#[test]
fn test_canonical_post_is_unchanged() {
    let canonical = post(
        r#"{"id":"3","title":"New","content":"Body","blocks":[{"id":"b","type":"paragraph","size":"medium","content":"Body"}]}"#,
    );

    let (changed, migrated) = normalize(canonical.clone());

    assert!(!changed);
    assert_eq!(migrated, canonical);
}

#[test]
fn test_edit_session_after_migration() {
    let legacy = post(
        r#"{"id":"4","content":"[{\"id\":\"intro\",\"type\":\"paragraph\",\"content\":\"Intro\"}]"}"#,
    );
    let (_, mut post) = normalize(legacy);
    let mut factory = BlockFactory::new(SequentialIdGenerator::new("n"));

    // Add a two-column layout after the intro, then fill its right column.
    let columns = factory.create("columns", post.blocks().unwrap()).unwrap();
    let columns_id = columns.id().clone();
    let blocks = post.blocks_mut().unwrap();
    Mutation::Insert {
        path: SequencePath::root(),
        index: 1,
        block: columns,
    }
    .apply(blocks)
    .unwrap();

    let mut heading = factory.create("heading", blocks).unwrap();
    if let folio_editor::Block::Heading(h) = &mut heading {
        h.content = "Right".to_string();
    }
    Mutation::Insert {
        path: SequencePath::root().child(columns_id.clone(), 1),
        index: 0,
        block: heading,
    }
    .apply(blocks)
    .unwrap();

    let updated = blocks.clone();
    post.set_blocks(updated);

    assert_eq!(post.content, "Intro\nRight");
    assert_eq!(columns_id, BlockId::from("n-1"));
}

#[test]
fn test_saved_post_roundtrips_through_json() {
    let legacy = post(
        r#"{"id":"5","blocks":"[{\"id\":\"g\",\"type\":\"grid\",\"columns\":3,\"gap\":16,\"children\":[{\"id\":\"h\",\"type\":\"heading\",\"content\":\"A\"},{\"id\":\"p\",\"type\":\"paragraph\",\"content\":\"B\"}]}]","content":"[]"}"#,
    );
    let (_, migrated) = normalize(legacy);

    let json = serde_json::to_string(&migrated).unwrap();
    let reloaded: Post = serde_json::from_str(&json).unwrap();
    let (changed, again) = normalize(reloaded);

    assert!(!changed);
    assert_eq!(again, migrated);
    assert_eq!(extract_text(again.blocks().unwrap()), "A\nB");
    assert_eq!(again.content, "A\nB");
}
