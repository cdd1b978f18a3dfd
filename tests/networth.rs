use std::sync::Arc;

use networth_calculator::domain::PetInfo;
use networth_calculator::{
    calculate_networth, CachedPriceProvider, JsonFileSource, NetworthCalculator, NetworthItem,
    PriceTable, Rarity, StaticPrices, ValuationConfig, ValuationError,
};

fn price_table(entries: &[(&str, f64)]) -> PriceTable {
    entries.iter().map(|(id, price)| (*id, *price)).collect()
}

fn fairy_helmet() -> NetworthItem {
    let mut item = NetworthItem::new("FAIRY_HELMET");
    for (name, level) in [
        ("growth", 6),
        ("hecatomb", 1),
        ("big_brain", 5),
        ("protection", 7),
        ("rejuvenate", 5),
        ("respiration", 3),
        ("aqua_affinity", 1),
        ("ultimate_legion", 5),
    ] {
        item.enchantments.insert(name.to_string(), level);
    }
    item.attributes.modifier = Some("ancient".to_string());
    item.attributes.hot_potato_count = 15;
    item
}

fn fairy_helmet_prices() -> PriceTable {
    price_table(&[
        ("FAIRY_HELMET", 25_000.0),
        ("ENCHANTMENT_GROWTH_6", 2_500_000.0),
        ("ENCHANTMENT_HECATOMB_1", 900_000.0),
        ("ENCHANTMENT_BIG_BRAIN_5", 5_000_000.0),
        ("ENCHANTMENT_PROTECTION_7", 1_800_000.0),
        ("ENCHANTMENT_REJUVENATE_5", 300_000.0),
        ("ENCHANTMENT_RESPIRATION_3", 2_000.0),
        ("ENCHANTMENT_AQUA_AFFINITY_1", 1_000.0),
        ("ENCHANTMENT_ULTIMATE_LEGION_5", 12_000_000.0),
        ("PRECURSOR_GEAR", 600_000.0),
        ("HOT_POTATO_BOOK", 75_000.0),
        ("FUMING_POTATO_BOOK", 1_100_000.0),
    ])
}

#[test]
fn fairy_helmet_scenario() {
    let result = calculate_networth(&fairy_helmet(), &fairy_helmet_prices(), &ValuationConfig::default())
        .unwrap();

    assert_eq!(result.base_price, 25_000.0);
    assert!(result.price >= 1_000_000.0);
    for kind in ["ENCHANT", "REFORGE", "HOT_POTATO_BOOK", "FUMING_POTATO_BOOK"] {
        assert!(
            result.calculation.iter().any(|entry| entry.kind == kind),
            "missing {kind} entry"
        );
    }

    let total: f64 = result.calculation.iter().map(|entry| entry.value).sum();
    assert!((result.price - result.base_price - total).abs() < 1e-3);
}

#[test]
fn decoded_json_item_values_like_built_one() {
    let json = r#"{
        "skyblockId": "FAIRY_HELMET",
        "count": 1,
        "enchantments": {
            "growth": 6, "hecatomb": 1, "big_brain": 5, "protection": 7,
            "rejuvenate": 5, "respiration": 3, "aqua_affinity": 1, "ultimate_legion": 5
        },
        "attributes": { "modifier": "ancient", "hot_potato_count": 15 }
    }"#;
    let decoded: NetworthItem = serde_json::from_str(json).unwrap();
    let prices = fairy_helmet_prices();
    let config = ValuationConfig::default();

    let from_json = calculate_networth(&decoded, &prices, &config).unwrap();
    let built = calculate_networth(&fairy_helmet(), &prices, &config).unwrap();
    assert_eq!(from_json.price, built.price);
    assert_eq!(from_json.calculation, built.calculation);
}

#[test]
fn unknown_item_is_worth_nothing() {
    let result = calculate_networth(
        &NetworthItem::new("NOT_A_REAL_ITEM"),
        &fairy_helmet_prices(),
        &ValuationConfig::default(),
    )
    .unwrap();
    assert_eq!(result.price, 0.0);
    assert_eq!(result.networth, 0.0);
    assert!(result.calculation.is_empty());
    assert!(!result.priced);
}

#[test]
fn backpack_sums_contents_into_one_entry() {
    let json = r#"{
        "skyblockId": "JUMBO_BACKPACK",
        "attributes": {
            "inventory": {
                "0": { "skyblockId": "ENCHANTED_DIAMOND", "count": 64 },
                "1": null,
                "2": { "skyblockId": "LARGE_TALISMAN_BAG", "attributes": { "inventory": {
                    "0": { "skyblockId": "HEGEMONY_ARTIFACT" }
                } } }
            }
        }
    }"#;
    let backpack: NetworthItem = serde_json::from_str(json).unwrap();
    let prices = price_table(&[
        ("JUMBO_BACKPACK", 10_000_000.0),
        ("ENCHANTED_DIAMOND", 1_500.0),
        ("HEGEMONY_ARTIFACT", 100_000_000.0),
    ]);

    let result = calculate_networth(&backpack, &prices, &ValuationConfig::default()).unwrap();
    assert_eq!(result.calculation.len(), 1);
    assert_eq!(result.calculation[0].kind, "INVENTORY");
    assert_eq!(result.calculation[0].value, 64.0 * 1_500.0 + 100_000_000.0);
    assert_eq!(result.networth, 10_000_000.0 + 96_000.0 + 100_000_000.0);
}

#[test]
fn deep_nesting_is_rejected() {
    let mut item = NetworthItem::new("BACKPACK");
    for _ in 0..10 {
        let mut outer = NetworthItem::new("BACKPACK");
        outer.attributes.inventory.insert(0, Some(item));
        item = outer;
    }

    let err = calculate_networth(&item, &PriceTable::default(), &ValuationConfig::default())
        .unwrap_err();
    assert!(matches!(err, ValuationError::DepthExceeded { max_depth: 6, .. }));
}

fn legendary_pet(pet_type: &str, exp: f64) -> NetworthItem {
    let mut item = NetworthItem::new("PET");
    item.pet_info = Some(PetInfo {
        pet_type: pet_type.to_string(),
        tier: Rarity::Legendary,
        exp,
        held_item: None,
        skin: None,
        candy_used: 0,
    });
    item
}

#[test]
fn pet_price_boundaries() {
    let prices = price_table(&[
        ("LVL_1_LEGENDARY_BAL", 3_000_000.0),
        ("LVL_100_LEGENDARY_BAL", 18_000_000.0),
    ]);
    let config = ValuationConfig::default();

    let fresh = calculate_networth(&legendary_pet("BAL", 0.0), &prices, &config).unwrap();
    assert_eq!(fresh.price, 3_000_000.0);

    let maxed = calculate_networth(&legendary_pet("BAL", 25_353_230.0), &prices, &config).unwrap();
    assert_eq!(maxed.price, 18_000_000.0);

    let unknown = calculate_networth(&legendary_pet("SNAIL", 0.0), &prices, &config).unwrap();
    assert_eq!(unknown.networth, 0.0);
    assert!(unknown.calculation.is_empty());
}

#[test]
fn candied_pet_with_held_item() {
    let mut item = legendary_pet("BAL", 0.0);
    if let Some(pet) = item.pet_info.as_mut() {
        pet.held_item = Some("DWARF_TURTLE_SHELMET".to_string());
        pet.candy_used = 10;
    }
    let prices = price_table(&[
        ("LVL_1_LEGENDARY_BAL", 3_000_000.0),
        ("LVL_100_LEGENDARY_BAL", 18_000_000.0),
        ("DWARF_TURTLE_SHELMET", 1_000_000.0),
    ]);

    let result = calculate_networth(&item, &prices, &ValuationConfig::default()).unwrap();
    let kinds: Vec<&str> = result.calculation.iter().map(|entry| entry.kind.as_str()).collect();
    assert_eq!(kinds, ["PET_ITEM", "PET_CANDY"]);
    assert!((result.price - 4_000_000.0 * 0.65).abs() < 1e-6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_valuations_share_a_snapshot() {
    let prices = Arc::new(fairy_helmet_prices());
    let config = Arc::new(ValuationConfig::default());
    let expected = calculate_networth(&fairy_helmet(), &prices, &config).unwrap();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let prices = Arc::clone(&prices);
            let config = Arc::clone(&config);
            tokio::spawn(async move { calculate_networth(&fairy_helmet(), &prices, &config) })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), expected);
    }
}

#[tokio::test]
async fn calculator_with_static_prices() {
    let calculator = NetworthCalculator::new(StaticPrices::new(fairy_helmet_prices()));
    let results = calculator
        .calculate_many(&[fairy_helmet(), NetworthItem::new("FAIRY_HELMET")])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].networth > results[1].networth);
    assert_eq!(results[1].networth, 25_000.0);
}

#[tokio::test]
async fn calculator_with_cached_file_prices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.json");
    std::fs::write(&path, r#"{"HYPERION": 900000000, "WITHER_BLOOD": 4000000}"#).unwrap();

    let calculator = NetworthCalculator::new(CachedPriceProvider::new(JsonFileSource::new(&path)));
    let mut item = NetworthItem::new("HYPERION");
    item.attributes.modifier = Some("withered".to_string());

    let result = calculator.calculate(&item).await.unwrap();
    assert_eq!(result.price, 904_000_000.0);

    // The cached snapshot keeps serving after the file goes away.
    std::fs::remove_file(&path).unwrap();
    let again = calculator.calculate(&item).await.unwrap();
    assert_eq!(again.price, 904_000_000.0);
}
