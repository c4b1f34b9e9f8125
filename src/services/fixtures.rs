// src/services/fixtures.rs

//! In-memory wiki used by the service tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use crate::error::{AppError, Result};
use crate::services::WikiClient;
use crate::utils::http::Fetcher;

pub const BASE_URL: &str = "https://baldursgate.example.org";

const CARSOMYR: &str = r#"{{Infobox item
|image = Carsomyr.png
|type = [[Two-Handed Sword|Two-handed sword]]
|enchantment = +5
|value = 20,000
|weight = 12
}}
'''Carsomyr +5''' is a [[two-handed sword]] found in [[Baldur's Gate II: Shadows of Amn]].<ref>Item file SW2H10.ITM</ref>

== Description ==
Carsomyr is a weapon of legend, perhaps one of the most famous holy avengers in the Realms. It was forged in the fires of the Gray Forge.

STATISTICS:
Combat abilities: Dispel magic on hit
THAC0: +5

== Location ==
Sold by [[Cromwell]] once the blade is reforged.

[[Category:Two-handed swords]]
[[Category:Magical weapons]]
"#;

const ABYSSAL_BLADE: &str = r#"{{Infobox item
|image = Abyssal Blade.png
|type = Short sword
|magical = yes
|value = N/A
}}
The '''Abyssal Blade''' is a [[short sword]] from [[Throne of Bhaal]].

== Description ==
This black blade was quenched in the blood of a balor.
"#;

const ALGERNON_CLOAK: &str = r#"{{Infobox item
|image = Algernon Cloak.png
|type = Cloak
|value = 1,750 gp
}}
== Description ==
The cloak was made for the rogue Algernon, who wore it until his arrest.
"#;

const ANGURVADAL: &str = r#"{{Infobox item
|type = Long sword
|enchantment = +2
|value = 7750
}}
== Description ==
Angurvadal, the Stream of Anguish, burns with a flame in times of war.
"#;

const ACORNS: &str = r#"{{Infobox item
|image = Acorns.png
|type = Plant
|value = 1
}}
'''Acorns''' are the nuts of the oak tree, gathered by druids.

[[Category:Plants]]
"#;

const ELMINSTER_ECOLOGIES: &str = r#"{{Infobox item
|type = Book
|value = 0
}}
A volume of the sage's writings on the creatures of the Realms.
"#;

const AXE_OF_THE_UNYIELDING: &str = r#"{{Infobox item
|type = Battle axe
|enchantment = +3
|value = 3,500
}}
== Description ==
This axe was last seen in the hands of a dwarven lord,
lost during the retreat through the Marching Mountains.

STATISTICS:
Equipped abilities: Fatigue immunity
"#;

const BRACERS_OF_DEFENSE: &str = r#"{{Infobox item
|item type = Bracers
|enchantment = 0
|magical = yes
|value = 3,000
}}
== Description ==
Grinning Glen, the Knight of the Woods, wore these bracers into every battle, and fell to his own folly.

Parameters:
Armor Class: 3
"#;

const DWARVEN_THROWER: &str = r#"{{Infobox item
|type = War Hammer
|enchantment = +3
|value = 3,000
}}
A returning hammer forged for dwarven warriors.
"#;

const HEADBAND_OF_FOCUS: &str = r#"{{Infobox item
|item type = Headband
|value = 5,000
}}
Worn by monks seeking inner stillness.
"#;

const DRAGONS_BREATH: &str = r#"{{Infobox item
|image = Dragon&#39;s Breath.png
|type = Potion
|value = 250
}}
== Description ==
Trying to profit from a red dragon's lair, an alchemist bottled its fiery breath.
"#;

const STUB_PAGE: &str = "{{stub}}\nNothing is known about this item yet.\n";

const REDIRECT_PAGE: &str = "#REDIRECT [[Carsomyr]]";

/// Shared state behind every fetcher handed out by a [`FakeWiki`].
#[derive(Default)]
struct FakeState {
    pages: HashMap<String, String>,
    categories: HashMap<String, Vec<String>>,
    images: HashMap<String, String>,
    json_requests: AtomicUsize,
    redirect_requests: AtomicUsize,
}

/// Canned wiki that counts network requests.
#[derive(Clone, Default)]
pub struct FakeWiki {
    state: Arc<FakeState>,
}

impl FakeWiki {
    /// Item pages, categories and images modelled on a Baldur's Gate wiki.
    pub fn baldur() -> Self {
        let mut state = FakeState::default();
        for (title, markup) in [
            ("Carsomyr", CARSOMYR),
            ("Abyssal_Blade", ABYSSAL_BLADE),
            ("Algernon_Cloak", ALGERNON_CLOAK),
            ("Angurvadal", ANGURVADAL),
            ("Acorns", ACORNS),
            ("Elminster_Ecologies", ELMINSTER_ECOLOGIES),
            ("Axe_of_the_Unyielding", AXE_OF_THE_UNYIELDING),
            ("Bracers_of_Defense_AC_3", BRACERS_OF_DEFENSE),
            ("Dwarven_Thrower", DWARVEN_THROWER),
            ("Headband_of_Focus", HEADBAND_OF_FOCUS),
            ("Dragon's_Breath_(item)", DRAGONS_BREATH),
            ("Stub_Page", STUB_PAGE),
            ("Carsomyr_+5", REDIRECT_PAGE),
        ] {
            state.pages.insert(title.to_string(), markup.to_string());
        }

        state.categories.insert(
            "Weapons".to_string(),
            vec![
                "Carsomyr".to_string(),
                "Category:Two-handed swords".to_string(),
                "Abyssal Blade".to_string(),
                "template:Infobox item".to_string(),
                "Ghost Blade".to_string(),
                "User:Imoen".to_string(),
                "Dragon's Breath (item)".to_string(),
                "Thread:12345".to_string(),
                "Portal:Items".to_string(),
            ],
        );

        for name in ["Carsomyr.png", "Abyssal_Blade.png", "Dragon%27s_Breath.png"] {
            state.images.insert(
                name.to_string(),
                format!("https://static.example.org/images/{name}"),
            );
        }

        Self {
            state: Arc::new(state),
        }
    }

    /// A client backed by this wiki, caching under `cache_dir`.
    pub fn client(&self, cache_dir: &Path) -> WikiClient {
        WikiClient::new(BASE_URL, cache_dir, self.clone())
    }

    pub fn json_requests(&self) -> usize {
        self.state.json_requests.load(Ordering::SeqCst)
    }

    pub fn redirect_requests(&self) -> usize {
        self.state.redirect_requests.load(Ordering::SeqCst)
    }

    fn page_response(&self, title: &str) -> Value {
        let key = title.replace(' ', "_");
        match self.state.pages.get(&key) {
            Some(markup) => json!({
                "batchcomplete": "",
                "query": { "pages": { "4242": {
                    "pageid": 4242,
                    "ns": 0,
                    "title": title,
                    "revisions": [{
                        "contentformat": "text/x-wiki",
                        "contentmodel": "wikitext",
                        "*": markup
                    }]
                }}}
            }),
            None => json!({
                "batchcomplete": "",
                "query": { "pages": { "-1": { "ns": 0, "title": title, "missing": "" } } }
            }),
        }
    }

    fn members(&self, category: &str) -> Vec<String> {
        self.state
            .categories
            .get(category)
            .cloned()
            .unwrap_or_default()
    }

    fn category_response(&self, cmtitle: &str) -> Value {
        let category = cmtitle.trim_start_matches("Category:");
        let members: Vec<Value> = self
            .members(category)
            .iter()
            .enumerate()
            .map(|(i, title)| json!({ "pageid": i + 1, "ns": 0, "title": title }))
            .collect();
        json!({ "batchcomplete": "", "query": { "categorymembers": members } })
    }

    fn articles_response(&self, category: &str) -> Value {
        let mut items = vec![json!({
            "id": 1,
            "title": format!("Category:{category}"),
            "url": format!("/wiki/Category:{category}"),
        })];
        items.extend(self.members(category).iter().enumerate().map(|(i, title)| {
            json!({
                "id": 100 + i,
                "title": title,
                "url": format!("/wiki/{}", title.replace(' ', "_")),
            })
        }));
        json!({ "items": items, "basepath": BASE_URL })
    }
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or("")
}

#[async_trait]
impl Fetcher for FakeWiki {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.state.json_requests.fetch_add(1, Ordering::SeqCst);

        let parsed = Url::parse(url)?;
        let params: HashMap<String, String> = parsed.query_pairs().into_owned().collect();

        match parsed.path() {
            "/api.php" if param(&params, "list") == "categorymembers" => {
                Ok(self.category_response(param(&params, "cmtitle")))
            }
            "/api.php" if param(&params, "prop") == "revisions" => {
                Ok(self.page_response(param(&params, "titles")))
            }
            "/api/v1/Articles/List" => Ok(self.articles_response(param(&params, "category"))),
            _ => Err(AppError::shape("fake wiki", format!("404 for {url}"))),
        }
    }

    async fn resolve_redirect(&self, url: &str) -> Result<String> {
        self.state.redirect_requests.fetch_add(1, Ordering::SeqCst);

        let prefix = format!("{BASE_URL}/wiki/Special:FilePath/");
        url.strip_prefix(&prefix)
            .and_then(|name| self.state.images.get(name))
            .cloned()
            .ok_or_else(|| AppError::shape("fake wiki", format!("404 for {url}")))
    }
}
