use crate::cursor::CharSource;

/// Skips a `/* ... */` block comment. The opening `/*` has already been
/// consumed by the caller's `starts_with` check — this consumes it here.
/// Comments do NOT nest: the first `*/` closes the comment regardless of
/// how many `/*` appear inside. Reaching EOF before a closing `*/` is
/// silently accepted (a documented quirk, not an error).
pub(super) fn skip_block_comment(cursor: &mut CharSource<'_>) {
    cursor.next(); // '/'
    cursor.next(); // '*'
    loop {
        match cursor.next() {
            None => return,
            Some('*') if cursor.peek() == Some('/') => {
                cursor.next();
                return;
            }
            Some(_) => continue,
        }
    }
}
