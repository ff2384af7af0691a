//! Synthetic workload generation.

use cls_common::{CompileRequestBody, DEFAULT_COMPILER};
use rand::Rng;

/// Length of the random request identifier, in hex characters.
const ID_LEN: usize = 8;

/// One synthetic compile job: a short correlation identifier plus the
/// wire body to forward downstream. The identifier is never
/// interpreted, only logged.
#[derive(Debug, Clone)]
pub struct CompileJob {
    pub id: String,
    pub body: CompileRequestBody,
}

/// Generate one synthetic job.
///
/// The document length is drawn uniformly from `[1, max_doc_len]`. The
/// payload starts with the request identifier and is padded with
/// filler to exactly the drawn length, so the configured bound on
/// simulated duration always holds.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, max_doc_len: usize) -> CompileJob {
    let doc_len = rng.gen_range(1..=max_doc_len.max(1));
    let id = random_id(rng);

    let mut doc = String::with_capacity(doc_len);
    doc.extend(id.chars().take(doc_len));
    while doc.len() < doc_len {
        doc.push('x');
    }

    CompileJob {
        id,
        body: CompileRequestBody {
            doc,
            compiler: DEFAULT_COMPILER.to_string(),
        },
    }
}

fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect()
}
