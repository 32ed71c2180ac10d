use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, StopWordFilter, TextAnalyzer, Token, TokenStream};

/// English stop words dropped before term weighting.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
	"a","about","above","after","again","against","all","almost","alone","along","already","also","although","always","am","among","an","and","another","any","anyhow","anyone","anything","anyway","anywhere","are","around","as","at",
	"back","be","became","because","become","becomes","been","before","beforehand","behind","being","below","beside","besides","between","beyond","both","but","by",
	"can","cannot","could","did","do","does","doing","done","down","during","each","either","else","elsewhere","enough","etc","even","ever","every","everyone","everything","everywhere","except",
	"few","for","former","formerly","from","further","had","has","have","having","he","hence","her","here","hereafter","hereby","herein","hers","herself","him","himself","his","how","however",
	"i","ie","if","in","indeed","into","is","it","its","itself","just","last","latter","least","less","made","many","may","me","meanwhile","might","mine","more","moreover","most","mostly","much","must","my","myself",
	"namely","neither","never","nevertheless","next","no","nobody","none","noone","nor","not","nothing","now","nowhere","of","off","often","on","once","only","onto","or","other","others","otherwise","our","ours","ourselves","out","over","own",
	"per","perhaps","please","rather","re","same","seem","seemed","seeming","seems","several","she","should","since","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such",
	"than","that","the","their","theirs","them","themselves","then","thence","there","thereafter","thereby","therefore","therein","these","they","this","those","though","through","throughout","thru","thus","to","together","too","toward","towards",
	"under","until","up","upon","us","very","via","was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby","wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why","will","with","within","without","would",
	"yet","you","your","yours","yourself","yourselves",
];

const MAX_TOKEN_BYTES: usize = 64;
const MIN_TOKEN_CHARS: usize = 2;

/// Tokenizer shared by corpus fitting and query transformation: alphanumeric
/// runs, lowercased, stop words removed, single characters dropped.
#[derive(Clone)]
pub struct EnglishAnalyzer {
	inner: TextAnalyzer,
}

impl EnglishAnalyzer {
	pub fn new() -> Self {
		let inner = TextAnalyzer::builder(SimpleTokenizer::default())
			.filter(RemoveLongFilter::limit(MAX_TOKEN_BYTES))
			.filter(LowerCaser)
			.filter(StopWordFilter::remove(ENGLISH_STOP_WORDS.iter().map(|s| s.to_string())))
			.build();
		Self { inner }
	}

	pub fn tokens(&self, text: &str) -> Vec<String> {
		// token_stream needs `&mut`; the analyzer is a cheap boxed clone.
		let mut analyzer = self.inner.clone();
		let mut stream = analyzer.token_stream(text);
		let mut out = Vec::new();
		stream.process(&mut |token: &Token| {
			if token.text.chars().count() >= MIN_TOKEN_CHARS {
				out.push(token.text.clone());
			}
		});
		out
	}
}

impl Default for EnglishAnalyzer {
	fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for EnglishAnalyzer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnglishAnalyzer").field("stop_words", &ENGLISH_STOP_WORDS.len()).finish()
	}
}
