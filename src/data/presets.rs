use phf::phf_map;

// Label sets, comma separated. `\n` marks a line break inside a label.
static PRESETS: phf::Map<&'static str, &'static str> = phf_map! {
    "beer" => "salty,spicy,floral,sour/tart,sweet,linger/\nfinish,clean,body,savory,bitter,smoky,caramel,chocolate,stone\nfruit,citrus\nfruit,berry\nfruit",
    "coffee" => "acidity,body,sweetness,bitterness,aftertaste,aroma,fruity,nutty,chocolate,floral",
    "wine" => "fruit,acidity,tannin,body,sweetness,alcohol,finish,oak",
    "whisky" => "smoky,peaty,medicinal,sweet,vanilla,spicy,fruity,floral,malty,woody,nutty,winey",
    "tea" => "astringent,floral,grassy,malty,smoky,sweet,vegetal,fruity",
};

pub fn preset_labels(name: &str) -> Option<Vec<String>> {
    PRESETS
        .get(name.to_lowercase().as_str())
        .map(|s| s.split(',').map(str::to_owned).collect())
}

pub fn preset_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PRESETS.keys().copied().collect();
    names.sort_unstable();
    names
}
