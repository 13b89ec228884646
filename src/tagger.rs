//! Morphological tagger backends.
//!
//! Every backend is adapted to one contract, [`Tagger::segment`], which yields
//! [`Morpheme`]s. Lindera covers both languages with feature-string output;
//! engines handing out structured tokens (Kiwi style) plug in through
//! [`StructuredTagger`].

use lindera::dictionary::{load_dictionary, load_user_dictionary};
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use lindera::tokenizer::Tokenizer;

use crate::error::TaggerError;
use crate::resolver::{is_korean_verb_tag, KOREAN_VERB_ENDING};

/// Placeholder some dictionaries use for an empty feature
const PLACEHOLDER: &str = "*";

/// Lindera's whole feature list for an out-of-vocabulary segment
const UNKNOWN_FEATURE: &str = "UNK";

/// One segment produced by a tagger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Morpheme {
    /// Exact substring of the input
    pub surface: String,
    /// Raw part-of-speech tag, possibly compound (`VCP+EF`)
    pub tag: String,
    /// Dictionary form
    pub lemma: String,
    /// Katakana reading
    pub reading: String,
    /// Orthographic base form (UniDic `orthBase`)
    pub base_lemma: String,
}

/// Positions of the interesting fields in a delimited feature list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pub tag: usize,
    pub lemma: Option<usize>,
    pub reading: Option<usize>,
    pub base_lemma: Option<usize>,
    pub unknown: UnknownTags,
}

/// Tag set used to label out-of-vocabulary segments by character class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownTags {
    UniDic,
    KoDic,
}

impl UnknownTags {
    /// Tag for an unknown `surface`, following the dictionaries' `unk.def` categories
    pub fn tag_for(&self, surface: &str) -> &'static str {
        let symbolic = !surface.chars().any(char::is_alphanumeric);

        match self {
            UnknownTags::UniDic if symbolic => "補助記号",
            UnknownTags::UniDic => "名詞",
            UnknownTags::KoDic if symbolic => "SY",
            UnknownTags::KoDic if surface.chars().all(|c| c.is_numeric()) => "SN",
            UnknownTags::KoDic if surface.chars().any(|c| matches!(c, '\u{4E00}'..='\u{9FFF}')) => "SH",
            UnknownTags::KoDic if surface.chars().any(|c| matches!(c, '\u{AC00}'..='\u{D7A3}')) => "NNG",
            UnknownTags::KoDic if surface.chars().any(char::is_alphabetic) => "SL",
            UnknownTags::KoDic => "SY",
        }
    }
}

impl FeatureLayout {
    /// UniDic: pos1, ..., lForm (6), lemma (7), orth, pron, orthBase (10), ...
    pub const UNIDIC: FeatureLayout = FeatureLayout {
        tag: 0,
        lemma: Some(7),
        reading: Some(6),
        base_lemma: Some(10),
        unknown: UnknownTags::UniDic,
    };

    /// mecab-ko-dic: tag, semantic class, final consonant, reading (3), ...
    pub const KO_DIC: FeatureLayout = FeatureLayout {
        tag: 0,
        lemma: Some(3),
        reading: None,
        base_lemma: None,
        unknown: UnknownTags::KoDic,
    };
}

impl Morpheme {
    /// Build from a feature list. Missing or placeholder fields become empty;
    /// an `UNK` list is tagged from the surface's character class.
    pub fn from_features(surface: &str, features: &[&str], layout: &FeatureLayout) -> Self {
        if features.is_empty() || features[0] == UNKNOWN_FEATURE {
            return Self {
                surface: surface.to_string(),
                tag: layout.unknown.tag_for(surface).to_string(),
                ..Default::default()
            };
        }

        let field = |index: Option<usize>| {
            index
                .and_then(|i| features.get(i))
                .map(|f| f.trim())
                .filter(|f| *f != PLACEHOLDER)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            surface: surface.to_string(),
            tag: field(Some(layout.tag)),
            lemma: field(layout.lemma),
            reading: field(layout.reading),
            base_lemma: field(layout.base_lemma),
        }
    }
}

/// A morphological tagger.
///
/// Implementations need not be safe to call concurrently; callers hold one
/// instance behind a lock.
pub trait Tagger: Send {
    /// Segment `text` into morphemes, in input order
    fn segment(&self, text: &str) -> Result<Vec<Morpheme>, TaggerError>;

    fn name(&self) -> &'static str;
}

/// Lindera tokenizer with a fixed feature layout
pub struct LinderaTagger {
    tokenizer: Tokenizer,
    layout: FeatureLayout,
}

impl LinderaTagger {
    /// Load a dictionary (`embedded://unidic`, `embedded://ko-dic` or a path)
    pub fn new(dictionary_uri: &str, user_dictionary_uri: Option<&str>, layout: FeatureLayout) -> Result<Self, TaggerError> {
        let dictionary = load_dictionary(dictionary_uri).map_err(|e| TaggerError::Dictionary {
            uri: dictionary_uri.to_string(),
            message: e.to_string(),
        })?;

        let user_dictionary = match user_dictionary_uri {
            Some(uri) => Some(load_user_dictionary(uri, &dictionary.metadata).map_err(|e| {
                TaggerError::Dictionary {
                    uri: uri.to_string(),
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        let segmenter = Segmenter::new(Mode::Normal, dictionary, user_dictionary);
        tracing::info!("Loaded tagger dictionary {}", dictionary_uri);

        Ok(Self {
            tokenizer: Tokenizer::new(segmenter),
            layout,
        })
    }

    /// Japanese tagger over UniDic
    pub fn japanese(dictionary_uri: &str, user_dictionary_uri: Option<&str>) -> Result<Self, TaggerError> {
        Self::new(dictionary_uri, user_dictionary_uri, FeatureLayout::UNIDIC)
    }

    /// Korean tagger over mecab-ko-dic
    pub fn korean(dictionary_uri: &str, user_dictionary_uri: Option<&str>) -> Result<Self, TaggerError> {
        Self::new(dictionary_uri, user_dictionary_uri, FeatureLayout::KO_DIC)
    }
}

impl Tagger for LinderaTagger {
    fn segment(&self, text: &str) -> Result<Vec<Morpheme>, TaggerError> {
        let mut tokens = self
            .tokenizer
            .tokenize(text)
            .map_err(|e| TaggerError::Segment(e.to_string()))?;

        let mut morphemes = Vec::with_capacity(tokens.len());
        for token in tokens.iter_mut() {
            let surface = token.surface.as_ref().to_string();
            let details = token.details();
            morphemes.push(Morpheme::from_features(&surface, &details, &self.layout));
        }

        Ok(morphemes)
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}

/// Sejong part-of-speech tags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KoTag {
    Nng,
    Nnp,
    Nnb,
    Nr,
    Np,
    Vv,
    Va,
    Vx,
    Vcp,
    Vcn,
    Mm,
    Mag,
    Maj,
    Ic,
    Jks,
    Jkc,
    Jkg,
    Jko,
    Jkb,
    Jkv,
    Jkq,
    Jx,
    Jc,
    Ep,
    Ef,
    Ec,
    Etn,
    Etm,
    Xpn,
    Xsn,
    Xsv,
    Xsa,
    Xr,
    Sf,
    Sp,
    Ss,
    Se,
    So,
    Sw,
    Sl,
    Sh,
    Sn,
    Other(String),
}

impl KoTag {
    /// Parse a tag name. Irregular-conjugation markers (`VV-I`, `VA-R`) are dropped.
    pub fn parse(tag: &str) -> Self {
        let base = tag.split('-').next().unwrap_or(tag);
        match base {
            "NNG" => KoTag::Nng,
            "NNP" => KoTag::Nnp,
            "NNB" => KoTag::Nnb,
            "NR" => KoTag::Nr,
            "NP" => KoTag::Np,
            "VV" => KoTag::Vv,
            "VA" => KoTag::Va,
            "VX" => KoTag::Vx,
            "VCP" => KoTag::Vcp,
            "VCN" => KoTag::Vcn,
            "MM" => KoTag::Mm,
            "MAG" => KoTag::Mag,
            "MAJ" => KoTag::Maj,
            "IC" => KoTag::Ic,
            "JKS" => KoTag::Jks,
            "JKC" => KoTag::Jkc,
            "JKG" => KoTag::Jkg,
            "JKO" => KoTag::Jko,
            "JKB" => KoTag::Jkb,
            "JKV" => KoTag::Jkv,
            "JKQ" => KoTag::Jkq,
            "JX" => KoTag::Jx,
            "JC" => KoTag::Jc,
            "EP" => KoTag::Ep,
            "EF" => KoTag::Ef,
            "EC" => KoTag::Ec,
            "ETN" => KoTag::Etn,
            "ETM" => KoTag::Etm,
            "XPN" => KoTag::Xpn,
            "XSN" => KoTag::Xsn,
            "XSV" => KoTag::Xsv,
            "XSA" => KoTag::Xsa,
            "XR" => KoTag::Xr,
            "SF" => KoTag::Sf,
            "SP" => KoTag::Sp,
            "SS" => KoTag::Ss,
            "SE" => KoTag::Se,
            "SO" => KoTag::So,
            "SW" => KoTag::Sw,
            "SL" => KoTag::Sl,
            "SH" => KoTag::Sh,
            "SN" => KoTag::Sn,
            _ => KoTag::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            KoTag::Nng => "NNG",
            KoTag::Nnp => "NNP",
            KoTag::Nnb => "NNB",
            KoTag::Nr => "NR",
            KoTag::Np => "NP",
            KoTag::Vv => "VV",
            KoTag::Va => "VA",
            KoTag::Vx => "VX",
            KoTag::Vcp => "VCP",
            KoTag::Vcn => "VCN",
            KoTag::Mm => "MM",
            KoTag::Mag => "MAG",
            KoTag::Maj => "MAJ",
            KoTag::Ic => "IC",
            KoTag::Jks => "JKS",
            KoTag::Jkc => "JKC",
            KoTag::Jkg => "JKG",
            KoTag::Jko => "JKO",
            KoTag::Jkb => "JKB",
            KoTag::Jkv => "JKV",
            KoTag::Jkq => "JKQ",
            KoTag::Jx => "JX",
            KoTag::Jc => "JC",
            KoTag::Ep => "EP",
            KoTag::Ef => "EF",
            KoTag::Ec => "EC",
            KoTag::Etn => "ETN",
            KoTag::Etm => "ETM",
            KoTag::Xpn => "XPN",
            KoTag::Xsn => "XSN",
            KoTag::Xsv => "XSV",
            KoTag::Xsa => "XSA",
            KoTag::Xr => "XR",
            KoTag::Sf => "SF",
            KoTag::Sp => "SP",
            KoTag::Ss => "SS",
            KoTag::Se => "SE",
            KoTag::So => "SO",
            KoTag::Sw => "SW",
            KoTag::Sl => "SL",
            KoTag::Sh => "SH",
            KoTag::Sn => "SN",
            KoTag::Other(tag) => tag,
        }
    }
}

/// A token from an engine that reports form and tag but no lemma
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredToken {
    pub form: String,
    pub tag: KoTag,
}

impl From<StructuredToken> for Morpheme {
    fn from(token: StructuredToken) -> Self {
        let tag = token.tag.as_str().to_string();
        let lemma = if is_korean_verb_tag(&tag) && !token.form.ends_with(KOREAN_VERB_ENDING) {
            format!("{}{}", token.form, KOREAN_VERB_ENDING)
        } else {
            token.form.clone()
        };

        Morpheme {
            surface: token.form,
            tag,
            lemma,
            ..Default::default()
        }
    }
}

/// An engine that yields structured tokens
pub trait StructuredSource: Send {
    fn tokenize(&self, text: &str) -> Result<Vec<StructuredToken>, TaggerError>;
}

/// Adapts a [`StructuredSource`] to the [`Tagger`] contract
pub struct StructuredTagger<S> {
    source: S,
}

impl<S: StructuredSource> StructuredTagger<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: StructuredSource> Tagger for StructuredTagger<S> {
    fn segment(&self, text: &str) -> Result<Vec<Morpheme>, TaggerError> {
        Ok(self
            .source
            .tokenize(text)?
            .into_iter()
            .map(Morpheme::from)
            .collect())
    }

    fn name(&self) -> &'static str {
        "structured"
    }
}
