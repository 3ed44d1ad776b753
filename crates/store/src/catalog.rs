use mealweek_shared::recipe::{Category, Recipe};

const CATALOG: [(u64, &str, Option<&str>, bool, Category); 21] = [
    (1, "Fläskpannkaka med lingonsylt", Some("Morberg lagar husmanskost"), true, Category::Meat),
    (2, "Makaronipudding", Some("Morberg lagar husmanskost"), true, Category::Pasta),
    (3, "Grönkålspasta", Some("Portionen under tian"), true, Category::Pasta),
    (4, "Zucchini- och svamppasta", Some("Portionen under tian"), true, Category::Pasta),
    (5, "Chili sin carne", Some("Portionen under tian"), true, Category::Vegetarian),
    (6, "Fälldinska grytan", Some("Lena"), true, Category::Meat),
    (7, "Köttfärssås", Some("Mossarp"), false, Category::Pasta),
    (8, "Stekt falukorv med morotsstuvning", None, false, Category::Meat),
    (9, "Makaroner och köttbullar", None, false, Category::Pasta),
    (10, "Lax med sås i ugn", None, false, Category::Fish),
    (11, "Tacos", None, false, Category::Other),
    (12, "Kebab i pitabröd", None, false, Category::Other),
    (13, "Fiskpinnar och potatismos", None, false, Category::Fish),
    (14, "Panerad torsk", None, false, Category::Fish),
    (15, "Korvstroganoff med ris", Some("ICA.se – recept 533512"), true, Category::Meat),
    (16, "Flygande Jacob", Some("ICA.se – recept 717569"), true, Category::Chicken),
    (17, "Klassisk lasagne", Some("ICA.se – recept 679675"), true, Category::Pasta),
    (18, "Raggmunk med fläsk", Some("ICA.se – recept 721803"), true, Category::Meat),
    (19, "Äkta carbonara utan grädde", Some("ICA.se – recept 726730"), true, Category::Pasta),
    (20, "One-pot pasta", Some("ICA.se – recept 721661"), true, Category::Pasta),
    (
        21,
        "Pasticciata – krämig pastasås med salsiccia och mascarpone",
        Some("Zeta.nu"),
        true,
        Category::Pasta,
    ),
];

/// Built-in recipes a fresh store starts with, none of them cooked yet.
pub fn catalog() -> Vec<Recipe> {
    CATALOG
        .iter()
        .map(|&(id, name, source, has_recipe_content, category)| Recipe {
            id,
            name: name.to_owned(),
            source: source.map(str::to_owned),
            has_recipe_content,
            category,
            last_cooked: None,
        })
        .collect()
}
