use colored::Colorize;

use crate::master_data::MasterData;

fn format_lists(master: &MasterData) -> String {
    let mut out = Vec::new();
    for (name, items) in master.lists() {
        out.push(format!("{}", name.bold()));
        let options = textwrap::Options::new(76)
            .initial_indent("  ")
            .subsequent_indent("  ");
        out.push(textwrap::fill(&items.join(", "), options));
        out.push(String::new());
    }
    out.join("\n").trim_end().to_string()
}

pub fn run(master: &MasterData) {
    println!("{}", format_lists(master));
}
