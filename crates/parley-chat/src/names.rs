//! Flavor display names
//!
//! Each client picks a random name at join time. Name selection is
//! view-side and non-deterministic; the name only enters replicated state
//! through the join event.

use rand::seq::SliceRandom;

const NAMES: &[&str] = &[
    "Acorn", "Allspice", "Almond", "Ancho", "Anise", "Aoli", "Apple", "Apricot", "Arrowroot",
    "Asparagus", "Avocado", "Baklava", "Balsamic", "Banana", "Barbecue", "Bacon", "Basil",
    "Bay Leaf", "Bergamot", "Blackberry", "Blueberry", "Broccoli", "Buttermilk", "Cabbage",
    "Camphor", "Canaloupe", "Cappuccino", "Caramel", "Caraway", "Cardamom", "Catnip",
    "Cauliflower", "Cayenne", "Celery", "Cherry", "Chervil", "Chives", "Chipotle", "Chocolate",
    "Coconut", "Cookie Dough", "Chicory", "Chutney", "Cilantro", "Cinnamon", "Clove",
    "Coriander", "Cranberry", "Croissant", "Cucumber", "Cupcake", "Cumin", "Curry", "Dandelion",
    "Dill", "Durian", "Eclair", "Eggplant", "Espresso", "Felafel", "Fennel", "Fenugreek", "Fig",
    "Garlic", "Gelato", "Gumbo", "Honeydew", "Hyssop", "Ghost Pepper", "Ginger", "Ginseng",
    "Grapefruit", "Habanero", "Harissa", "Hazelnut", "Horseradish", "Jalepeno", "Juniper",
    "Ketchup", "Key Lime", "Kiwi", "Kohlrabi", "Kumquat", "Latte", "Lavender", "Lemon Grass",
    "Lemon Zest", "Licorice", "Macaron", "Mango", "Maple Syrup", "Marjoram", "Marshmallow",
    "Matcha", "Mayonnaise", "Mint", "Mulberry", "Mustard", "Nectarine", "Nutmeg", "Olive Oil",
    "Orange Peel", "Oregano", "Papaya", "Paprika", "Parsley", "Parsnip", "Peach", "Peanut",
    "Pecan", "Pennyroyal", "Peppercorn", "Persimmon", "Pineapple", "Pistachio", "Plum",
    "Pomegranate", "Poppy Seed", "Pumpkin", "Quince", "Ragout", "Raspberry", "Ratatouille",
    "Rosemary", "Rosewater", "Saffron", "Sage", "Sassafras", "Sea Salt", "Sesame Seed",
    "Shiitake", "Sorrel", "Soy Sauce", "Spearmint", "Strawberry", "Strudel", "Sunflower Seed",
    "Sriracha", "Tabasco", "Tamarind", "Tandoori", "Tangerine", "Tarragon", "Thyme", "Tofu",
    "Truffle", "Tumeric", "Valerian", "Vanilla", "Vinegar", "Wasabi", "Walnut", "Watercress",
    "Watermelon", "Wheatgrass", "Yarrow", "Yuzu", "Zucchini",
];

/// Pick a random display name.
pub fn random_name() -> String {
    NAMES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Acorn")
        .to_string()
}
