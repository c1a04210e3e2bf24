//! Lexical-scan-only dump (`--`): prints the token stream instead of
//! running the matching engine at all, per the Driver's step 5 branch.

use std::io::{self, Write};

use crate::store::TokenStore;

pub fn dump_tokens(out: &mut dyn Write, store: &TokenStore) -> io::Result<()> {
    for text in store.texts() {
        for pos in text.start..text.limit {
            let token = store.token(pos);
            writeln!(
                out,
                "{}:{}\tid={}\tstart={}",
                text.filename,
                text.line_at(pos),
                token.id,
                token.may_start_run
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Token;
    use std::sync::Arc;

    #[test]
    fn dumps_one_line_per_token() {
        let mut store = TokenStore::new();
        let h = store.begin_text(Arc::from("a.txt"), false);
        for n in 0..3u32 {
            store.append(Token { id: n, may_start_run: true });
            store.push_line(h, n + 1);
        }
        store.end_text(h);

        let mut out = Vec::new();
        dump_tokens(&mut out, &store).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().next().unwrap().contains("a.txt:1"));
    }
}
