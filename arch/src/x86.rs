//! 386 tables.

pub(crate) const REGISTERS: &[&str] = &[
    "AL", "CL", "DL", "BL", "AH", "CH", "DH", "BH", //
    "AX", "CX", "DX", "BX", "SP", "BP", "SI", "DI", //
    "F0", "F1", "F2", "F3", "F4", "F5", "F6", "F7", //
    "CS", "SS", "DS", "ES", "FS", "GS", //
    "GDTR", "IDTR", "LDTR", "MSW", "TASK", //
    "CR0", "CR1", "CR2", "CR3", "CR4", "CR5", "CR6", "CR7", //
    "DR0", "DR1", "DR2", "DR3", "DR4", "DR5", "DR6", "DR7", //
    "TR0", "TR1", "TR2", "TR3", "TR4", "TR5", "TR6", "TR7", //
    "X0", "X1", "X2", "X3", "X4", "X5", "X6", "X7", //
    "TLS",
];

pub(crate) const OPCODES: &[&str] = &[
    "XXX", "AAA", "AAD", "AAM", "AAS", //
    "ADCB", "ADCL", "ADCW", "ADDB", "ADDL", "ADDW", "ADJSP", //
    "ANDB", "ANDL", "ANDW", "ARPL", "BOUNDL", "BOUNDW", //
    "BSFL", "BSFW", "BSRL", "BSRW", "BSWAPL", //
    "BTL", "BTW", "BTCL", "BTCW", "BTRL", "BTRW", "BTSL", "BTSW", //
    "BYTE", "CLC", "CLD", "CLI", "CLTS", "CMC", //
    "CMPB", "CMPL", "CMPW", "CMPSB", "CMPSL", "CMPSW", //
    "CMPXCHGB", "CMPXCHGL", "CMPXCHGW", "CMPXCHG8B", "CPUID", "CDQ", "CWD", //
    "DAA", "DAS", "DECB", "DECL", "DECW", "DIVB", "DIVL", "DIVW", //
    "ENTER", "HLT", "IDIVB", "IDIVL", "IDIVW", "IMULB", "IMULL", "IMULW", //
    "INB", "INL", "INW", "INCB", "INCL", "INCW", "INSB", "INSL", "INSW", "INT", "INTO", //
    "IRETL", "IRETW", //
    "JCC", "JCS", "JCXZL", "JCXZW", "JEQ", "JGE", "JGT", "JHI", "JLE", "JLS", "JLT", "JMI", //
    "JMP", "JNE", "JOC", "JOS", "JPC", "JPL", "JPS", //
    "LAHF", "LARL", "LARW", "LEAL", "LEAW", "LEAVEL", "LEAVEW", //
    "LOCK", "LODSB", "LODSL", "LODSW", "LONG", "LOOP", "LOOPEQ", "LOOPNE", "LSLL", "LSLW", //
    "MOVB", "MOVL", "MOVW", "MOVBLSX", "MOVBLZX", "MOVBWSX", "MOVBWZX", "MOVWLSX", "MOVWLZX", //
    "MOVSB", "MOVSL", "MOVSW", "MOVO", "MOVOU", "MOVNTO", "MOVQ", "MOVSD", "MOVSS", //
    "MULB", "MULL", "MULW", //
    "NEGB", "NEGL", "NEGW", "NOP", "NOTB", "NOTL", "NOTW", //
    "ORB", "ORL", "ORW", "OUTB", "OUTL", "OUTW", "OUTSB", "OUTSL", "OUTSW", "PAUSE", //
    "POPAL", "POPAW", "POPFL", "POPFW", "POPL", "POPW", //
    "PUSHAL", "PUSHAW", "PUSHFL", "PUSHFW", "PUSHL", "PUSHW", //
    "RCLB", "RCLL", "RCLW", "RCRB", "RCRL", "RCRW", "REP", "REPN", "RDTSC", "RET", //
    "ROLB", "ROLL", "ROLW", "RORB", "RORL", "RORW", "SAHF", //
    "SALB", "SALL", "SALW", "SARB", "SARL", "SARW", "SBBB", "SBBL", "SBBW", //
    "SCASB", "SCASL", "SCASW", //
    "SETCC", "SETCS", "SETEQ", "SETGE", "SETGT", "SETHI", "SETLE", "SETLS", //
    "SETLT", "SETMI", "SETNE", "SETOC", "SETOS", "SETPC", "SETPL", "SETPS", //
    "SHLB", "SHLL", "SHLW", "SHRB", "SHRL", "SHRW", //
    "STC", "STD", "STI", "STOSB", "STOSL", "STOSW", "SUBB", "SUBL", "SUBW", "SYSCALL", //
    "TESTB", "TESTL", "TESTW", "WAIT", "WORD", //
    "XCHGB", "XCHGL", "XCHGW", "XADDB", "XADDL", "XADDW", "XLAT", "XORB", "XORL", "XORW", //
    "SHLDL", "SHLDW", "SHRDL", "SHRDW", //
    "FMOVD", "FMOVF", "FMOVL", "FMOVV", "FMOVW", "FADDD", "FADDF", "FSUBD", "FSUBF", //
    "FMULD", "FMULF", "FDIVD", "FDIVF", "FCHS", "FABS", "FSQRT", //
    "FFREE", "FLDCW", "FLDENV", "FRSTOR", "FSAVE", "FSTCW", "FSTENV", "FSTSW", //
    "ADDSD", "ADDSS", "SUBSD", "SUBSS", "MULSD", "MULSS", "DIVSD", "DIVSS", //
    "COMISD", "COMISS", "UCOMISD", "UCOMISS", "CMPSD", "CMPSS", "MASKMOVOU", //
    "PAND", "POR", "PXOR", "PSHUFL", "PCMPEQB", "PMOVMSKB", "PINSRW", "PEXTRW", //
    "MFENCE", "LFENCE", "SFENCE", "EMMS", "UNDEF", //
    "CALL", "DATA", "GLOBL", "GOK", "HISTORY", "NAME", "TEXT", "END", //
    "USEFIELD", "TYPE", "FUNCDATA", "PCDATA", "CHECKNIL", "VARDEF", "VARKILL", "DUFFCOPY", "DUFFZERO",
];

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("JA", "JHI"),
    ("JAE", "JCC"),
    ("JB", "JCS"),
    ("JBE", "JLS"),
    ("JC", "JCS"),
    ("JE", "JEQ"),
    ("JG", "JGT"),
    ("JHS", "JCC"),
    ("JL", "JLT"),
    ("JLO", "JCS"),
    ("JNA", "JLS"),
    ("JNAE", "JCS"),
    ("JNB", "JCC"),
    ("JNBE", "JHI"),
    ("JNC", "JCC"),
    ("JNG", "JLE"),
    ("JNGE", "JLT"),
    ("JNL", "JGE"),
    ("JNLE", "JGT"),
    ("JNO", "JOC"),
    ("JNP", "JPC"),
    ("JNS", "JPL"),
    ("JNZ", "JNE"),
    ("JO", "JOS"),
    ("JP", "JPS"),
    ("JPE", "JPS"),
    ("JPO", "JPC"),
    ("JS", "JMI"),
    ("JZ", "JEQ"),
    ("MASKMOVDQU", "MASKMOVOU"),
    ("MOVOA", "MOVO"),
    ("MOVNTDQ", "MOVNTO"),
];

// These write to the destination slot.
pub(crate) const UNARY_DESTINATION: &[&str] = &[
    "BSWAPL", "CMPXCHG8B", //
    "DECB", "DECL", "DECW", "INCB", "INCL", "INCW", //
    "NEGB", "NEGL", "NEGW", "NOTB", "NOTL", "NOTW", "POPL", "POPW", //
    "SETCC", "SETCS", "SETEQ", "SETGE", "SETGT", "SETHI", "SETLE", "SETLS", //
    "SETLT", "SETMI", "SETNE", "SETOC", "SETOS", "SETPC", "SETPL", "SETPS", //
    "FFREE", "FLDENV", "FSAVE", "FSTCW", "FSTENV", "FSTSW",
];
