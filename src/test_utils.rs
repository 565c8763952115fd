#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeSet;

    use crate::models::domain::{ArticleDigest, KeyEntities};

    /// A trimmed-down but structurally faithful Wikipedia article page.
    pub fn article_html() -> String {
        r##"<!DOCTYPE html>
<html>
<head><title>Alan Turing - Wikipedia</title></head>
<body>
<h1 id="firstHeading" class="firstHeading">Alan Turing</h1>
<div id="mw-content-text">
  <div class="mw-parser-output">
    <p>Alan Mathison Turing was an English mathematician, computer scientist,
    logician, cryptanalyst, philosopher and theoretical biologist.[1][2] He was
    highly influential in the development of theoretical computer science,
    providing a formalisation of the concepts of algorithm and computation with
    the <a href="/wiki/Turing_machine">Turing machine</a>.[3]</p>
    <p>Born in Maida Vale, London, Turing was educated at
    <a href="/wiki/Princeton_University">Princeton University</a> in the
    <a href="/wiki/United_States">United States</a>, where he studied under
    <a href="/wiki/Alonzo_Church">Alonzo Church</a>. His dissertation extended
    the work of <a href="/wiki/Alonzo_Church">Alonzo Church</a> on
    ordinal logic, and he later worked with
    <a href="/wiki/Gordon_Welchman">Gordon Welchman</a> at Bletchley Park.</p>
    <p>Coordinates: 51°59′N 0°44′W</p>
    <p>short</p>
    <p>During the Second World War, Turing worked for the Government Code and
    Cypher School at Bletchley Park, Britain's codebreaking centre that produced
    Ultra intelligence, where he devised techniques for speeding the breaking of
    German ciphers.[4] See <a href="/wiki/Category:Cryptographers">Category link</a>
    and the <a href="/wiki/Enigma_machine">Enigma machine</a>.</p>
    <h2><span class="mw-headline">Early life and education</span><span>[edit]</span></h2>
    <p>Turing was born in Maida Vale while his father was on leave from his
    position with the Indian Civil Service, a period documented in archives.</p>
    <h2><span class="mw-headline">Career and research</span></h2>
    <h3><span class="mw-headline">Legacy</span></h3>
    <h2><span class="mw-headline">See also</span></h2>
    <h2><span class="mw-headline">References</span></h2>
    <h2><span class="mw-headline">External links</span></h2>
  </div>
</div>
</body>
</html>"##
            .to_string()
    }

    /// A near-empty stub page: content region exists, body text is minimal.
    pub fn stub_page_html() -> String {
        r#"<html>
<head><title>Stub - Wikipedia</title></head>
<body>
<h1 class="firstHeading">Stub</h1>
<div id="mw-content-text"><p>This article is a stub.</p></div>
</body>
</html>"#
            .to_string()
    }

    pub fn sample_digest() -> ArticleDigest {
        let mut people = BTreeSet::new();
        people.insert("Alan Turing".to_string());
        people.insert("Alonzo Church".to_string());
        let mut organizations = BTreeSet::new();
        organizations.insert("Princeton University".to_string());
        let mut locations = BTreeSet::new();
        locations.insert("United States".to_string());

        ArticleDigest {
            title: "Alan Turing".to_string(),
            summary: "Alan Mathison Turing was an English mathematician and computer scientist."
                .to_string(),
            sections: vec![
                "Early life and education".to_string(),
                "Career and research".to_string(),
                "Legacy".to_string(),
            ],
            entities: KeyEntities {
                people,
                organizations,
                locations,
            },
        }
    }

    /// A well-formed model reply with five valid questions.
    pub fn valid_llm_response() -> String {
        serde_json::json!({
            "questions": [
                {
                    "question": "Where was Alan Turing born?",
                    "options": ["Maida Vale, London", "Cambridge", "Manchester", "Oxford"],
                    "answer": "Maida Vale, London",
                    "difficulty": "easy",
                    "explanation": "Turing was born in Maida Vale, London."
                },
                {
                    "question": "Under whom did Turing study at Princeton?",
                    "options": ["Alonzo Church", "Kurt Gödel", "John von Neumann", "David Hilbert"],
                    "answer": "Alonzo Church",
                    "difficulty": "medium",
                    "explanation": "His dissertation was supervised by Alonzo Church."
                },
                {
                    "question": "Where did Turing work during the Second World War?",
                    "options": ["Bletchley Park", "Los Alamos", "Cavendish Laboratory", "Dollis Hill"],
                    "answer": "Bletchley Park",
                    "difficulty": "easy",
                    "explanation": "He worked at the Government Code and Cypher School at Bletchley Park."
                },
                {
                    "question": "Which concept did Turing formalise?",
                    "options": ["Computation", "Relativity", "Evolution", "Thermodynamics"],
                    "answer": "Computation",
                    "difficulty": "medium",
                    "explanation": "The Turing machine formalised algorithm and computation."
                },
                {
                    "question": "Which machine's ciphers did Turing help break?",
                    "options": ["Enigma", "Lorenz only", "Purple", "Sigaba"],
                    "answer": "Enigma",
                    "difficulty": "hard",
                    "explanation": "He devised techniques for breaking German Enigma ciphers."
                }
            ],
            "related_topics": ["Enigma machine", "Turing machine", "Bletchley Park", "Cryptanalysis"]
        })
        .to_string()
    }
}
