use p9asm::lexer::tokenize;
use p9asm::token::Token;

fn case(code: &str, expects: Vec<(Token, &str)>) {
    let tokens = tokenize(code).unwrap();

    println!(" {code}");
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:?} {:?}", idx, token.token, token.text);
    }

    assert_eq!(tokens.len(), expects.len());
    for (idx, (token, text)) in expects.iter().enumerate() {
        assert_eq!(tokens[idx].token, *token);
        assert_eq!(tokens[idx].text, *text);
    }
}

#[test]
fn tests() {
    use Token::*;
    case(
        "MOVQ foo<>+4(SB)(CX*8), DX:AX // load",
        vec![
            (Ident, "MOVQ"),
            (Ident, "foo"),
            (Char('<'), "<"),
            (Char('>'), ">"),
            (Char('+'), "+"),
            (Int, "4"),
            (Char('('), "("),
            (Ident, "SB"),
            (Char(')'), ")"),
            (Char('('), "("),
            (Ident, "CX"),
            (Char('*'), "*"),
            (Int, "8"),
            (Char(')'), ")"),
            (Char(','), ","),
            (Ident, "DX"),
            (Char(':'), ":"),
            (Ident, "AX"),
        ],
    );
    case(
        "TEXT runtime·memmove(SB), $0-24",
        vec![
            (Ident, "TEXT"),
            (Ident, "runtime·memmove"),
            (Char('('), "("),
            (Ident, "SB"),
            (Char(')'), ")"),
            (Char(','), ","),
            (Char('$'), "$"),
            (Int, "0"),
            (Char('-'), "-"),
            (Int, "24"),
        ],
    );
    case(
        "$(1<<3>>1) $1.5e3 \"s\\n\" 'x'\n",
        vec![
            (Char('$'), "$"),
            (Char('('), "("),
            (Int, "1"),
            (Lsh, "<<"),
            (Int, "3"),
            (Rsh, ">>"),
            (Int, "1"),
            (Char(')'), ")"),
            (Char('$'), "$"),
            (Float, "1.5e3"),
            (String, "\"s\\n\""),
            (Rune, "'x'"),
            (Char('\n'), "\n"),
        ],
    );
}
