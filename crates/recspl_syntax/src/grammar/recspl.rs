//! The RecSPL rule set.
//!
//! `VNAME`, `FNAME` and `CONST` are not rules here: they are the abstract terminal classes the token
//! classifier produces, so a variable, function, number or text token matches them directly.

type Rules = &'static [(&'static str, &'static [&'static [&'static str]])];

/// Rules in declaration order. The first one (`PROG`) is the start symbol.
pub const RECSPL_RULES: Rules = &[
    ("PROG", &[&["main", "GLOBVARS", "ALGO", "FUNCTIONS"]]),
    ("GLOBVARS", &[&["VTYP", "VNAME", ",", "GLOBVARS"], &[]]),
    ("VTYP", &[&["num"], &["text"]]),
    ("ALGO", &[&["begin", "INSTRUC", "end"]]),
    ("INSTRUC", &[&["COMMAND", ";", "INSTRUC"], &[]]),
    (
        "COMMAND",
        &[
            &["skip"],
            &["halt"],
            &["print", "ATOMIC"],
            &["ASSIGN"],
            &["CALL"],
            &["BRANCH"],
            &["return", "ATOMIC"],
        ],
    ),
    ("ATOMIC", &[&["VNAME"], &["CONST"]]),
    ("ASSIGN", &[&["VNAME", "<", "input"], &["VNAME", "=", "TERM"]]),
    ("CALL", &[&["FNAME", "(", "ATOMIC", ",", "ATOMIC", ",", "ATOMIC", ")"]]),
    ("BRANCH", &[&["if", "COND", "then", "ALGO", "else", "ALGO"]]),
    ("TERM", &[&["ATOMIC"], &["CALL"], &["OP"]]),
    (
        "OP",
        &[&["UNOP", "(", "ARG", ")"], &["BINOP", "(", "ARG", ",", "ARG", ")"]],
    ),
    ("ARG", &[&["ATOMIC"], &["OP"]]),
    ("COND", &[&["SIMPLE"], &["COMPOSIT"]]),
    ("SIMPLE", &[&["BINOP", "(", "ATOMIC", ",", "ATOMIC", ")"]]),
    (
        "COMPOSIT",
        &[&["BINOP", "(", "SIMPLE", ",", "SIMPLE", ")"], &["UNOP", "(", "SIMPLE", ")"]],
    ),
    ("UNOP", &[&["not"], &["sqrt"]]),
    (
        "BINOP",
        &[&["or"], &["and"], &["eq"], &["grt"], &["add"], &["sub"], &["mul"], &["div"]],
    ),
    ("FUNCTIONS", &[&["DECL", "FUNCTIONS"], &[]]),
    ("DECL", &[&["HEADER", "BODY"]]),
    (
        "HEADER",
        &[&["FTYP", "FNAME", "(", "VNAME", ",", "VNAME", ",", "VNAME", ")"]],
    ),
    ("FTYP", &[&["num"], &["void"]]),
    ("BODY", &[&["PROLOG", "LOCVARS", "ALGO", "EPILOG", "SUBFUNCS", "end"]]),
    ("PROLOG", &[&["{"]]),
    ("EPILOG", &[&["}"]]),
    (
        "LOCVARS",
        &[&["VTYP", "VNAME", ",", "VTYP", "VNAME", ",", "VTYP", "VNAME", ","]],
    ),
    ("SUBFUNCS", &[&["FUNCTIONS"]]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use recspl_core::lang::reserved;

    #[test]
    fn test_every_literal_is_a_reserved_word() {
        let rule_names: Vec<&str> = RECSPL_RULES.iter().map(|(n, _)| *n).collect();
        for (name, alts) in RECSPL_RULES {
            for alt in *alts {
                for sym in *alt {
                    if rule_names.contains(sym) || matches!(*sym, "VNAME" | "FNAME" | "CONST") {
                        continue;
                    }
                    assert!(reserved::is_reserved(sym), "`{sym}` in rule {name} is not a reserved word");
                }
            }
        }
    }
}
