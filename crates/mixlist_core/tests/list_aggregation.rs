use mixlist_core::{
    kind_counts, rebuild, FoodItem, ListItem, NewFoodItem, NewPerson, NewQuote, Person, Quote,
    RecordKind, RecordStore,
};

fn seed(store: &RecordStore) {
    // Interleave kinds so insertion order differs from display order.
    store
        .insert::<Quote>(&NewQuote {
            text: "first quote".to_string(),
            author: "A".to_string(),
        })
        .unwrap();
    store
        .insert::<Person>(&NewPerson {
            name: "Alice".to_string(),
            age: 30,
        })
        .unwrap();
    store
        .insert::<FoodItem>(&NewFoodItem {
            name: "Pizza".to_string(),
            calories: 285,
            image: String::new(),
        })
        .unwrap();
    store
        .insert::<Person>(&NewPerson {
            name: "Bob".to_string(),
            age: 41,
        })
        .unwrap();
}

#[test]
fn rebuild_length_is_sum_of_kinds() {
    let store = RecordStore::open_in_memory().unwrap();
    seed(&store);

    let items = rebuild(&store).unwrap();
    let expected = store.get_all::<Person>().unwrap().len()
        + store.get_all::<FoodItem>().unwrap().len()
        + store.get_all::<Quote>().unwrap().len();
    assert_eq!(items.len(), expected);
    assert_eq!(kind_counts(&items).total(), expected);
}

#[test]
fn rebuild_orders_people_then_food_then_quotes() {
    let store = RecordStore::open_in_memory().unwrap();
    seed(&store);

    let kinds: Vec<_> = rebuild(&store).unwrap().iter().map(ListItem::kind).collect();
    assert_eq!(
        kinds,
        vec![
            RecordKind::Person,
            RecordKind::Person,
            RecordKind::Food,
            RecordKind::Quote
        ]
    );

    let items = rebuild(&store).unwrap();
    match &items[0] {
        ListItem::Person(person) => assert_eq!(person.name, "Alice"),
        other => panic!("unexpected first item: {other:?}"),
    }
}

#[test]
fn rebuild_reflects_every_mutation() {
    let store = RecordStore::open_in_memory().unwrap();
    seed(&store);
    let before = rebuild(&store).unwrap();

    let bob = store.get_by_id::<Person>(2).unwrap().unwrap();
    store.delete(&bob).unwrap();
    let after = rebuild(&store).unwrap();

    assert_eq!(after.len(), before.len() - 1);
    assert!(after
        .iter()
        .all(|item| !(item.kind() == RecordKind::Person && item.id() == 2)));
}

#[test]
fn rebuild_of_empty_store_is_empty() {
    let store = RecordStore::open_in_memory().unwrap();
    assert!(rebuild(&store).unwrap().is_empty());
}

#[test]
fn list_items_serialize_with_kind_tag() {
    let item = ListItem::Quote(Quote {
        id: 3,
        text: "t".to_string(),
        author: "a".to_string(),
    });
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["kind"], "quote");
    assert_eq!(json["id"], 3);
    assert_eq!(json["author"], "a");
}
