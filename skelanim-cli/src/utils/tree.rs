//! Skeleton tree rendering

use console::Style;
use skelanim::animation::{AnimationClip, BoneBindingTable, SkeletonNode};

/// How a skeleton node participates in skinning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Bound bone with a channel in the selected clip
    AnimatedBone,
    /// Bound bone without a channel
    Bone,
    /// Unbound node with a channel
    AnimatedHelper,
    /// Structural node only
    Helper,
}

impl NodeRole {
    pub fn classify(
        node: &SkeletonNode,
        bindings: &BoneBindingTable,
        clip: Option<&AnimationClip>,
    ) -> Self {
        let bound = bindings.contains(&node.name);
        let animated = clip.is_some_and(|clip| clip.channel(&node.name).is_some());
        match (bound, animated) {
            (true, true) => Self::AnimatedBone,
            (true, false) => Self::Bone,
            (false, true) => Self::AnimatedHelper,
            (false, false) => Self::Helper,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::AnimatedBone => "◆",
            Self::Bone => "◇",
            Self::AnimatedHelper => "○",
            Self::Helper => "·",
        }
    }

    pub fn style(self, no_color: bool) -> Style {
        if no_color {
            return Style::new();
        }
        match self {
            Self::AnimatedBone => Style::new().bold().green(),
            Self::Bone => Style::new().cyan(),
            Self::AnimatedHelper => Style::new().yellow(),
            Self::Helper => Style::new().dim(),
        }
    }
}

/// Options for tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub max_depth: Option<usize>,
    pub no_color: bool,
}

/// Render a skeleton as an indented tree
pub fn render_skeleton(
    root: &SkeletonNode,
    bindings: &BoneBindingTable,
    clip: Option<&AnimationClip>,
    options: &TreeOptions,
) -> String {
    let mut output = String::new();
    let context = RenderContext {
        bindings,
        clip,
        options,
    };
    context.render_node(root, &mut output, "", true, 0);
    output
}

struct RenderContext<'a> {
    bindings: &'a BoneBindingTable,
    clip: Option<&'a AnimationClip>,
    options: &'a TreeOptions,
}

impl RenderContext<'_> {
    fn render_node(
        &self,
        node: &SkeletonNode,
        output: &mut String,
        prefix: &str,
        is_last: bool,
        depth: usize,
    ) {
        if let Some(max_depth) = self.options.max_depth
            && depth > max_depth
        {
            return;
        }

        let role = NodeRole::classify(node, self.bindings, self.clip);
        let connector = if depth == 0 {
            ""
        } else if is_last {
            "└── "
        } else {
            "├── "
        };

        output.push_str(&format!(
            "{prefix}{connector}{} {}",
            role.marker(),
            role.style(self.options.no_color).apply_to(&node.name)
        ));
        if let Some(info) = self.bindings.get(&node.name) {
            output.push_str(&format!(" [id {}]", info.id));
        }
        output.push('\n');

        let child_prefix = if depth == 0 {
            String::new()
        } else if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.render_node(child, output, &child_prefix, i + 1 == count, depth + 1);
        }
    }
}
