use yew::{html, AttrValue, Children, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct StatsGridProps {
    #[prop_or(3)]
    pub columns: usize,
    pub children: Children,
}

/// Equal-width row of summary cards.
pub struct StatsGrid;

impl Component for StatsGrid {
    type Message = ();
    type Properties = StatsGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StatsGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, minmax(0, 1fr));
             gap: 16px;
             margin-bottom: 24px;",
            props.columns.max(1)
        );

        html! {
            <div class="stats-grid" style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
}

/// One titled figure inside a `StatsGrid`.
pub struct StatCard;

impl Component for StatCard {
    type Message = ();
    type Properties = StatCardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        StatCard
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="card stat-card">
                <div class="card-title">{ props.title.clone() }</div>
                <div class="stat-value">{ props.value.clone() }</div>
                {
                    if let Some(hint) = &props.hint {
                        html! { <div class="stat-hint">{ hint.clone() }</div> }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}
