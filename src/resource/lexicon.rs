//! Morphological lexicons backing dictionary lemmatization.
//!
//! A lexicon maps inflected forms to their base form. The file format is one
//! `form<TAB>lemma` pair per line; blank lines and `#` comment lines are
//! skipped. A `#version <name>` line names the lexicon revision, which is
//! reported alongside frequency tables so that re-runs can be compared.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use ahash::AHashMap;

use crate::error::{Result, WordFreqError};
use crate::resource::cache::file_cache_key;
use crate::resource::provider::{CacheCodec, ResourceProvider, ResourceSource};

/// Built-in English lexicon: irregular forms, high-frequency verb forms, and
/// words the suffix rules would otherwise damage (mapped to themselves).
const BUILTIN_LEXICON: &str = "#version builtin-en-1
am\tbe
are\tbe
is\tbe
was\tbe
were\tbe
been\tbe
being\tbe
has\thave
had\thave
having\thave
does\tdo
did\tdo
done\tdo
doing\tdo
goes\tgo
went\tgo
gone\tgo
going\tgo
said\tsay
says\tsay
saying\tsay
made\tmake
making\tmake
took\ttake
taken\ttake
taking\ttake
came\tcome
coming\tcome
saw\tsee
seen\tsee
seeing\tsee
knew\tknow
known\tknow
got\tget
gotten\tget
getting\tget
gave\tgive
given\tgive
giving\tgive
found\tfind
thought\tthink
told\ttell
became\tbecome
left\tleave
felt\tfeel
brought\tbring
began\tbegin
begun\tbegin
kept\tkeep
held\thold
stood\tstand
heard\thear
meant\tmean
met\tmeet
ran\trun
running\trun
paid\tpay
sat\tsit
sitting\tsit
spoke\tspeak
spoken\tspeak
lay\tlie
lain\tlie
led\tlead
grew\tgrow
grown\tgrow
lost\tlose
fell\tfall
fallen\tfall
sent\tsend
built\tbuild
understood\tunderstand
drew\tdraw
drawn\tdraw
broke\tbreak
broken\tbreak
spent\tspend
rose\trise
risen\trise
drove\tdrive
driven\tdrive
bought\tbuy
wore\twear
worn\twear
chose\tchoose
chosen\tchoose
sought\tseek
threw\tthrow
thrown\tthrow
caught\tcatch
taught\tteach
fought\tfight
wrote\twrite
written\twrite
ate\teat
eaten\teat
slept\tsleep
woke\twake
sang\tsing
sung\tsing
swam\tswim
flew\tfly
flown\tfly
forgot\tforget
forgotten\tforget
hid\thide
hidden\thide
shook\tshake
shaken\tshake
stole\tsteal
stolen\tsteal
struck\tstrike
tore\ttear
torn\ttear
won\twin
wept\tweep
swore\tswear
sworn\tswear
men\tman
women\twoman
children\tchild
feet\tfoot
teeth\ttooth
geese\tgoose
mice\tmouse
lice\tlouse
oxen\tox
people\tperson
lives\tlife
wives\twife
knives\tknife
leaves\tleaf
halves\thalf
selves\tself
wolves\twolf
thieves\tthief
loaves\tloaf
shelves\tshelf
better\tgood
best\tgood
worse\tbad
worst\tbad
always\talways
perhaps\tperhaps
news\tnews
series\tseries
species\tspecies
whereas\twhereas
sometimes\tsometimes
besides\tbesides
towards\ttowards
afterwards\tafterwards
upwards\tupwards
downwards\tdownwards
backwards\tbackwards
nevertheless\tnevertheless
hers\thers
ours\tours
yours\tyours
theirs\ttheirs
its\tits
his\this
this\tthis
thus\tthus
yes\tyes
alas\talas
across\tacross
unless\tunless
whose\twhose
otherwise\totherwise
";

/// A form -> lemma dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lexicon {
    version: String,
    entries: AHashMap<String, String>,
}

impl Lexicon {
    /// Create an empty lexicon with the given version name.
    pub fn new<S: Into<String>>(version: S) -> Self {
        Lexicon {
            version: version.into(),
            entries: AHashMap::new(),
        }
    }

    /// Parse the tab-separated lexicon format.
    ///
    /// Malformed lines (no tab, empty form or lemma, whitespace inside either)
    /// are rejected with the 1-based line number.
    pub fn parse(text: &str, default_version: &str) -> Result<Self> {
        let mut lexicon = Lexicon::new(default_version);

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(version) = version_directive(line) {
                if !version.is_empty() {
                    lexicon.version = version.to_string();
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            let entry = line
                .split_once('\t')
                .map(|(form, lemma)| (form.trim(), lemma.trim()))
                .filter(|(form, lemma)| is_word(form) && is_word(lemma));
            match entry {
                Some((form, lemma)) => lexicon.insert(form, lemma),
                None => {
                    return Err(WordFreqError::invalid_config(format!(
                        "malformed lexicon entry on line {}: {line:?}",
                        index + 1
                    )));
                }
            }
        }

        Ok(lexicon)
    }

    /// The built-in English lexicon.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_LEXICON, "builtin-en")
    }

    /// Add or replace an entry. Both sides are stored lowercase.
    pub fn insert(&mut self, form: &str, lemma: &str) {
        self.entries.insert(form.to_lowercase(), lemma.to_lowercase());
    }

    /// Look up the lemma of a form.
    pub fn lookup(&self, form: &str) -> Option<&str> {
        self.entries.get(form).map(String::as_str)
    }

    /// The lexicon revision name.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The name given by a `#version <name>` line, or `None` for other lines.
fn version_directive(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("#version")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && !text.contains(char::is_whitespace)
}

impl CacheCodec for Lexicon {
    fn encode(&self) -> String {
        let mut entries: Vec<(&String, &String)> = self.entries.iter().collect();
        entries.sort_unstable();

        let mut text = format!("#version {}\n", self.version);
        for (form, lemma) in entries {
            text.push_str(form);
            text.push('\t');
            text.push_str(lemma);
            text.push('\n');
        }
        text
    }

    fn decode(text: &str) -> Result<Self> {
        Self::parse(text, "cached")
    }
}

/// The built-in English lexicon source.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinLexicon;

impl ResourceSource<Lexicon> for BuiltinLexicon {
    fn id(&self) -> &str {
        "lexicon-builtin-en"
    }

    fn fetch(&self) -> Result<Lexicon> {
        Lexicon::builtin()
    }
}

/// A lexicon read from a local tab-separated file.
#[derive(Clone, Debug)]
pub struct FileLexicon {
    path: PathBuf,
    id: String,
}

impl FileLexicon {
    /// Read the lexicon from `path` when fetched.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let id = format!("lexicon-{}", path.display());
        FileLexicon { path, id }
    }
}

impl ResourceSource<Lexicon> for FileLexicon {
    fn id(&self) -> &str {
        &self.id
    }

    fn cache_key(&self) -> Option<String> {
        file_cache_key(&self.id, &self.path)
    }

    fn fetch(&self) -> Result<Lexicon> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WordFreqError::not_found(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let default_version = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("file");
        Lexicon::parse(&text, default_version)
    }
}

/// Provider of a lemma lexicon.
pub type LexiconProvider = ResourceProvider<Lexicon>;

static DEFAULT_PROVIDER: LazyLock<Arc<LexiconProvider>> =
    LazyLock::new(|| Arc::new(LexiconProvider::new(Box::new(BuiltinLexicon))));

/// The process-wide provider of the built-in English lexicon.
pub fn default_provider() -> Arc<LexiconProvider> {
    Arc::clone(&DEFAULT_PROVIDER)
}
