use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rgm_match::{
    AuthorLinkReport, ConfidenceLevel, LinkMethod, RankedCandidate, SimilarityBreakdown,
};
use rgm_model::{AuthorMatch, PublicationMetadata};

pub fn print_breakdown(name_a: &str, name_b: &str, breakdown: &SimilarityBreakdown) {
    println!("{name_a:?} vs {name_b:?}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Component"),
        header_cell("Value"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Token overlap"),
        Cell::new(format!("{:.3}", breakdown.jaccard)),
        dim_cell("Jaccard similarity of name tokens"),
    ]);
    for component in &breakdown.components {
        table.add_row(vec![
            Cell::new(component.name),
            Cell::new(format!("+{:.3}", component.value)).fg(Color::Green),
            Cell::new(&component.description),
        ]);
    }
    table.add_row(vec![
        Cell::new("Score")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{:.3}", breakdown.score())).add_attribute(Attribute::Bold),
        dim_cell(format!("raw total {:.3}, capped at 1.0", breakdown.raw_total())),
    ]);
    println!("{table}");
}

pub fn print_ranking(input: &str, best: Option<&AuthorMatch>, ranked: &[RankedCandidate]) {
    match best {
        Some(found) => println!(
            "Best match for {input:?}: {} ({}) score {:.3}",
            found.author.name, found.author.id, found.score
        ),
        None => println!("No confident match for {input:?}"),
    }
    if ranked.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Normalized"),
        header_cell("Score"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (idx, entry) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&entry.candidate.id),
            Cell::new(&entry.candidate.name),
            dim_cell(&entry.normalized_name),
            Cell::new(format!("{:.3}", entry.score)),
            level_cell(entry.level),
        ]);
    }
    println!("{table}");
}

pub fn print_publication(metadata: &PublicationMetadata) {
    println!("DOI: {}", metadata.doi);
    println!("Title: {}", metadata.title);
    println!("Type: {}", metadata.kind.label());
    if let Some(venue) = &metadata.venue {
        println!("Venue: {venue}");
    }
    if let Some(publisher) = &metadata.publisher {
        println!("Publisher: {publisher}");
    }
    if let Some(date) = &metadata.published {
        println!("Published: {date}");
    }
    let location: Vec<String> = [
        metadata.volume.as_ref().map(|v| format!("vol. {v}")),
        metadata.issue.as_ref().map(|i| format!("no. {i}")),
        metadata.pages.as_ref().map(|p| format!("pp. {p}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !location.is_empty() {
        println!("Location: {}", location.join(", "));
    }
    println!("Source: {}", metadata.source);

    if metadata.authors.is_empty() {
        println!("No authors listed");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Author"),
        header_cell("ORCID"),
        header_cell("Affiliations"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for author in &metadata.authors {
        let name = if author.is_organization {
            Cell::new(format!("{} (organization)", author.name)).fg(Color::DarkGrey)
        } else {
            Cell::new(&author.name)
        };
        table.add_row(vec![
            Cell::new(author.position),
            name,
            optional_cell(author.orcid.as_deref()),
            if author.affiliations.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(author.affiliations.join("; "))
            },
        ]);
    }
    println!("{table}");
}

pub fn print_link_report(metadata: &PublicationMetadata, report: &AuthorLinkReport) {
    println!("{} ({})", metadata.title, report.doi);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Author"),
        header_cell("Profile"),
        header_cell("Score"),
        header_cell("Method"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for author in &metadata.authors {
        let row = match report.link_for(author.position) {
            Some(link) => vec![
                Cell::new(author.position),
                Cell::new(&author.name),
                Cell::new(format!("{} ({})", link.candidate.name, link.candidate.id))
                    .fg(Color::Green),
                Cell::new(format!("{:.3}", link.score)),
                method_cell(link.method),
            ],
            None => vec![
                Cell::new(author.position),
                Cell::new(&author.name),
                dim_cell(if author.is_organization {
                    "organization"
                } else {
                    "unlinked"
                }),
                dim_cell("-"),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
    println!(
        "Linked {} of {} authors",
        report.links.len(),
        metadata.authors.len()
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn level_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(ConfidenceLevel::High) => Cell::new("high").fg(Color::Green),
        Some(ConfidenceLevel::Medium) => Cell::new("medium").fg(Color::Yellow),
        Some(ConfidenceLevel::Low) => Cell::new("low").fg(Color::Red),
        None => dim_cell("-"),
    }
}

fn method_cell(method: LinkMethod) -> Cell {
    match method {
        LinkMethod::Orcid => Cell::new("ORCID")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        LinkMethod::Name => Cell::new("name"),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
