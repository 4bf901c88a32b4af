use crate::graph::Transition;
use crate::nfa::Nfa;

impl Nfa {
    /// Renders the automaton in the [graphviz](https://graphviz.org/docs/layouts/dot/) dot
    /// language. Epsilon edges are labelled `ε`.
    pub fn to_dot(&self) -> String {
        let mut lines = vec![
            "digraph nfa {".to_string(),
            "    rankdir = LR;".to_string(),
            format!("    node [shape = doublecircle]; {};", self.accept()),
            "    node [shape = circle];".to_string(),
            "    start [shape = point];".to_string(),
            format!("    start -> {};", self.start()),
        ];
        lines.extend(self.graph().transitions().iter().map(edge));
        lines.push("}".to_string());
        lines.join("\n")
    }
}

fn edge(t: &Transition) -> String {
    let label = t.label.to_string().replace('\\', "\\\\").replace('"', "\\\"");
    format!("    {} -> {} [label = \"{}\"];", t.source, t.destination, label)
}
