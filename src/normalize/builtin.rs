//! Built-in lookup data for Indian mutual-fund factsheets.

pub const SECTOR_ALIASES: &[(&str, &str)] = &[
    ("it - software", "Information Technology"),
    ("it-software", "Information Technology"),
    ("it - services", "Information Technology"),
    ("information technology", "Information Technology"),
    ("software", "Information Technology"),
    ("banks", "Banking"),
    ("banking", "Banking"),
    ("private sector bank", "Banking"),
    ("public sector bank", "Banking"),
    ("finance", "Financial Services"),
    ("financial services", "Financial Services"),
    ("nbfc", "Financial Services"),
    ("insurance", "Insurance"),
    ("pharmaceuticals & biotechnology", "Pharmaceuticals"),
    ("pharmaceuticals", "Pharmaceuticals"),
    ("pharma", "Pharmaceuticals"),
    ("healthcare services", "Healthcare"),
    ("healthcare", "Healthcare"),
    ("consumer durables", "Consumer Durables"),
    ("consumer goods", "Consumer Goods"),
    ("diversified fmcg", "FMCG"),
    ("fmcg", "FMCG"),
    ("retailing", "Retailing"),
    ("retail", "Retailing"),
    ("auto components", "Automobile"),
    ("automobiles", "Automobile"),
    ("automobile", "Automobile"),
    ("telecom - services", "Telecom"),
    ("telecommunications", "Telecom"),
    ("telecom", "Telecom"),
    ("realty", "Real Estate"),
    ("real estate", "Real Estate"),
    ("cement & cement products", "Cement & Construction Materials"),
    ("cement", "Cement & Construction Materials"),
    ("construction", "Construction"),
    ("capital markets", "Capital Markets"),
    ("chemicals & petrochemicals", "Chemicals"),
    ("chemicals", "Chemicals"),
    ("industrial products", "Industrial Products"),
    ("industrial manufacturing", "Industrial Manufacturing"),
    ("aerospace & defense", "Aerospace & Defense"),
    ("aerospace & defence", "Aerospace & Defense"),
    ("defence", "Aerospace & Defense"),
    ("electrical equipment", "Electrical Equipment"),
    ("power", "Power"),
    ("petroleum products", "Oil & Gas"),
    ("oil & gas", "Oil & Gas"),
    ("oil", "Oil & Gas"),
    ("energy", "Energy"),
    ("ferrous metals", "Metals & Mining"),
    ("non - ferrous metals", "Metals & Mining"),
    ("metals & mining", "Metals & Mining"),
    ("auto", "Automobile"),
];

pub const AMC_ALIASES: &[(&str, &str)] = &[
    ("motilaloswal", "Motilal Oswal"),
    ("motilal oswal", "Motilal Oswal"),
    ("hdfc", "HDFC"),
    ("icici prudential", "ICICI Prudential"),
    ("icici", "ICICI Prudential"),
    ("sbi", "SBI"),
    ("axis", "Axis"),
    ("kotak", "Kotak"),
    ("nippon india", "Nippon India"),
    ("nippon", "Nippon India"),
    ("aditya birla", "Aditya Birla Sun Life"),
    ("absl", "Aditya Birla Sun Life"),
    ("dsp", "DSP"),
    ("tata", "Tata"),
    ("uti", "UTI"),
    ("franklin templeton", "Franklin Templeton"),
    ("franklin", "Franklin Templeton"),
    ("mirae asset", "Mirae Asset"),
    ("mirae", "Mirae Asset"),
    ("pgim", "PGIM India"),
    ("invesco", "Invesco India"),
    ("edelweiss", "Edelweiss"),
    ("canara robeco", "Canara Robeco"),
    ("bandhan", "Bandhan"),
    ("quantum", "Quantum"),
    ("quant", "Quant"),
    ("parag parikh", "PPFAS"),
    ("ppfas", "PPFAS"),
    ("groww", "Groww"),
    ("baroda bnp", "Baroda BNP Paribas"),
];

pub const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Banking",
        &[
            "bank",
            "hdfc bank",
            "icici bank",
            "axis bank",
            "kotak",
            "sbi",
            "indusind",
            "federal bank",
        ],
    ),
    (
        "Information Technology",
        &[
            "infosys",
            "tcs",
            "tata consultancy",
            "wipro",
            "tech mahindra",
            "hcl technologies",
            "coforge",
            "ltimindtree",
            "persistent",
            "mphasis",
        ],
    ),
    (
        "Pharmaceuticals",
        &[
            "pharma",
            "pharmaceuticals",
            "cipla",
            "lupin",
            "mankind",
            "aurobindo",
            "biocon",
            "divi",
        ],
    ),
    (
        "Financial Services",
        &[
            "bajaj finance",
            "bajaj finserv",
            "cholamandalam",
            "shriram",
            "muthoot",
            "manappuram",
            "piramal",
        ],
    ),
    (
        "Automobile",
        &[
            "motor",
            "motors",
            "maruti",
            "tata motors",
            "hero motocorp",
            "bajaj auto",
            "tvs",
            "ashok leyland",
            "motherson",
            "samvardhana",
        ],
    ),
    (
        "FMCG",
        &[
            "hindustan unilever",
            "itc",
            "nestle",
            "britannia",
            "dabur",
            "marico",
            "godrej consumer",
            "colgate",
        ],
    ),
    (
        "Telecom",
        &["bharti airtel", "vodafone", "indus towers", "telecom"],
    ),
    (
        "Energy",
        &[
            "reliance industries",
            "ongc",
            "oil india",
            "bpcl",
            "gail",
            "ntpc",
            "power grid",
            "adani power",
            "tata power",
        ],
    ),
    (
        "Metals & Mining",
        &[
            "tata steel",
            "jsw steel",
            "hindalco",
            "vedanta",
            "coal india",
            "nmdc",
            "hindustan zinc",
        ],
    ),
    (
        "Real Estate",
        &[
            "dlf",
            "godrej properties",
            "oberoi realty",
            "prestige",
            "phoenix mills",
            "brigade",
            "sobha",
            "macrotech",
        ],
    ),
    (
        "Consumer Durables",
        &[
            "titan",
            "havells",
            "voltas",
            "whirlpool",
            "crompton",
            "dixon",
            "amber",
            "kalyan jewellers",
        ],
    ),
    (
        "Retailing",
        &[
            "avenue supermarts",
            "trent",
            "dmart",
            "zomato",
            "swiggy",
            "nykaa",
            "devyani",
        ],
    ),
    (
        "Capital Markets",
        &[
            "bse",
            "mcx",
            "angel one",
            "icici securities",
            "exchange",
            "cams",
            "kfin",
        ],
    ),
    (
        "Aerospace & Defense",
        &[
            "hindustan aeronautics",
            "bharat dynamics",
            "bharat electronics",
            "zen technologies",
            "paras defence",
            "data patterns",
        ],
    ),
    (
        "Electrical Equipment",
        &[
            "abb",
            "siemens",
            "cg power",
            "ge vernova",
            "suzlon",
            "inox wind",
            "premier energies",
            "waaree",
            "apar",
            "polycab",
            "kaynes",
        ],
    ),
    (
        "Industrial Manufacturing",
        &[
            "larsen",
            "l&t",
            "thermax",
            "cummins",
            "grindwell norton",
            "titagarh",
        ],
    ),
    (
        "Chemicals",
        &[
            "asian paints",
            "pidilite",
            "upl",
            "srf",
            "gujarat fluorochemicals",
            "navin fluorine",
            "deepak nitrite",
        ],
    ),
];

pub const ISIN_DIRECTORY: &[(&str, &str)] = &[
    ("hdfc bank", "INE040A01034"),
    ("icici bank", "INE090A01021"),
    ("state bank of india", "INE062A01020"),
    ("axis bank", "INE238A01034"),
    ("kotak mahindra bank", "INE237A01028"),
    ("indusind bank", "INE095A01012"),
    ("federal bank", "INE171A01029"),
    ("bandhan bank", "INE545U01014"),
    ("idfc first bank", "INE092T01019"),
    ("tata consultancy services", "INE467B01029"),
    ("infosys", "INE009A01021"),
    ("wipro", "INE075A01022"),
    ("hcl technologies", "INE860A01027"),
    ("tech mahindra", "INE669C01036"),
    ("ltimindtree", "INE214T01019"),
    ("coforge", "INE591G01017"),
    ("persistent systems", "INE262H01013"),
    ("mphasis", "INE356A01018"),
    ("bajaj finance", "INE296A01024"),
    ("bajaj finserv", "INE918I01018"),
    ("hdfc life insurance", "INE795G01014"),
    ("sbi life insurance", "INE123W01016"),
    ("cholamandalam investment", "INE121A01024"),
    ("shriram finance", "INE721A01013"),
    ("muthoot finance", "INE414G01012"),
    ("dlf", "INE271C01023"),
    ("godrej properties", "INE484J01027"),
    ("oberoi realty", "INE093I01010"),
    ("prestige estates projects", "INE811K01011"),
    ("phoenix mills", "INE211B01039"),
    ("brigade enterprises", "INE791I01019"),
    ("macrotech developers", "INE670K01029"),
    ("multi commodity exchange of india", "INE745G01035"),
    ("icici securities", "INE763G01038"),
    ("kfin technologies", "INE138Y01010"),
    ("hindustan aeronautics", "INE066F01020"),
    ("bharat electronics", "INE263A01024"),
    ("bharat dynamics", "INE171Z01018"),
    ("zen technologies", "INE251B01027"),
    ("data patterns", "INE822Q01010"),
    ("cg power and industrial solutions", "INE067A01029"),
    ("suzlon energy", "INE040H01021"),
    ("polycab", "INE455K01017"),
    ("kaynes technology", "INE918Z01012"),
    ("thermax", "INE152A01029"),
    ("asian paints", "INE021A01026"),
    ("pidilite industries", "INE318A01026"),
    ("navin fluorine", "INE048G01026"),
    ("deepak nitrite", "INE288B01029"),
    ("avenue supermarts", "INE192R01011"),
    ("trent", "INE849A01020"),
    ("zomato", "INE758T01015"),
    ("devyani international", "INE872J01015"),
];
