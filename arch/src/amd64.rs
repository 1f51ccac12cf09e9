//! amd64 tables.

pub(crate) const REGISTERS: &[&str] = &[
    "AL", "CL", "DL", "BL", "SPB", "BPB", "SIB", "DIB", //
    "R8B", "R9B", "R10B", "R11B", "R12B", "R13B", "R14B", "R15B", //
    "AX", "CX", "DX", "BX", "SP", "BP", "SI", "DI", //
    "R8", "R9", "R10", "R11", "R12", "R13", "R14", "R15", //
    "AH", "CH", "DH", "BH", //
    "F0", "F1", "F2", "F3", "F4", "F5", "F6", "F7", //
    "M0", "M1", "M2", "M3", "M4", "M5", "M6", "M7", //
    "X0", "X1", "X2", "X3", "X4", "X5", "X6", "X7", //
    "X8", "X9", "X10", "X11", "X12", "X13", "X14", "X15", //
    "CS", "SS", "DS", "ES", "FS", "GS", //
    "GDTR", "IDTR", "LDTR", "MSW", "TASK", //
    "CR0", "CR1", "CR2", "CR3", "CR4", "CR5", "CR6", "CR7", //
    "CR8", "CR9", "CR10", "CR11", "CR12", "CR13", "CR14", "CR15", //
    "DR0", "DR1", "DR2", "DR3", "DR4", "DR5", "DR6", "DR7", //
    "TR0", "TR1", "TR2", "TR3", "TR4", "TR5", "TR6", "TR7", //
    "TLS",
];

pub(crate) const OPCODES: &[&str] = &[
    "XXX", "AAA", "AAD", "AAM", "AAS", //
    "ADCB", "ADCL", "ADCW", "ADCQ", "ADDB", "ADDL", "ADDW", "ADDQ", "ADJSP", //
    "ANDB", "ANDL", "ANDW", "ANDQ", "ARPL", "BOUNDL", "BOUNDW", //
    "BSFL", "BSFW", "BSFQ", "BSRL", "BSRW", "BSRQ", //
    "BTL", "BTW", "BTQ", "BTCL", "BTCW", "BTCQ", "BTRL", "BTRW", "BTRQ", "BTSL", "BTSW", "BTSQ", //
    "BSWAPL", "BSWAPQ", "BYTE", "CLC", "CLD", "CLI", "CLTS", "CMC", //
    "CMPB", "CMPL", "CMPW", "CMPQ", "CMPSB", "CMPSL", "CMPSW", "CMPSQ", //
    "CMPXCHGB", "CMPXCHGL", "CMPXCHGW", "CMPXCHGQ", "CMPXCHG8B", "CPUID", //
    "CWD", "CDQ", "CQO", "CWL", "CDQE", "DAA", "DAS", //
    "DECB", "DECL", "DECQ", "DECW", "DIVB", "DIVL", "DIVW", "DIVQ", //
    "ENTER", "HLT", "IDIVB", "IDIVL", "IDIVW", "IDIVQ", //
    "IMULB", "IMULL", "IMULW", "IMULQ", "INB", "INL", "INW", //
    "INCB", "INCL", "INCQ", "INCW", "INSB", "INSL", "INSW", "INT", "INTO", //
    "IRETL", "IRETW", "IRETQ", //
    "JCC", "JCS", "JCXZL", "JCXZQ", "JEQ", "JGE", "JGT", "JHI", "JLE", "JLS", "JLT", "JMI", //
    "JMP", "JNE", "JOC", "JOS", "JPC", "JPL", "JPS", //
    "LAHF", "LARL", "LARW", "LEAL", "LEAW", "LEAQ", "LEAVEL", "LEAVEW", "LEAVEQ", //
    "LOCK", "LODSB", "LODSL", "LODSW", "LODSQ", "LONG", "LOOP", "LOOPEQ", "LOOPNE", //
    "LSLL", "LSLW", "MOVB", "MOVL", "MOVW", "MOVQ", //
    "MOVBLSX", "MOVBLZX", "MOVBQSX", "MOVBQZX", "MOVBWSX", "MOVBWZX", //
    "MOVWLSX", "MOVWLZX", "MOVWQSX", "MOVWQZX", "MOVLQSX", "MOVLQZX", //
    "MOVSB", "MOVSL", "MOVSW", "MOVSQ", "MOVO", "MOVOU", "MOVNTO", "MOVNTIL", "MOVNTIQ", //
    "MOVSD", "MOVSS", "MOVAPD", "MOVAPS", "MOVUPD", "MOVUPS", //
    "MULB", "MULL", "MULW", "MULQ", //
    "NEGB", "NEGL", "NEGW", "NEGQ", "NOP", "NOTB", "NOTL", "NOTW", "NOTQ", //
    "ORB", "ORL", "ORW", "ORQ", "OUTB", "OUTL", "OUTW", "OUTSB", "OUTSL", "OUTSW", "PAUSE", //
    "POPFL", "POPFW", "POPFQ", "POPL", "POPW", "POPQ", //
    "PUSHFL", "PUSHFW", "PUSHFQ", "PUSHL", "PUSHW", "PUSHQ", //
    "RCLB", "RCLL", "RCLW", "RCLQ", "RCRB", "RCRL", "RCRW", "RCRQ", //
    "REP", "REPN", "RDTSC", "RET", //
    "ROLB", "ROLL", "ROLW", "ROLQ", "RORB", "RORL", "RORW", "RORQ", "SAHF", //
    "SALB", "SALL", "SALW", "SALQ", "SARB", "SARL", "SARW", "SARQ", //
    "SBBB", "SBBL", "SBBW", "SBBQ", "SCASB", "SCASL", "SCASW", "SCASQ", //
    "SETCC", "SETCS", "SETEQ", "SETGE", "SETGT", "SETHI", "SETLE", "SETLS", //
    "SETLT", "SETMI", "SETNE", "SETOC", "SETOS", "SETPC", "SETPL", "SETPS", //
    "SHLB", "SHLL", "SHLW", "SHLQ", "SHRB", "SHRL", "SHRW", "SHRQ", //
    "STC", "STD", "STI", "STOSB", "STOSL", "STOSW", "STOSQ", //
    "SUBB", "SUBL", "SUBW", "SUBQ", "SYSCALL", "SYSRET", //
    "TESTB", "TESTL", "TESTW", "TESTQ", "WAIT", "WORD", //
    "XCHGB", "XCHGL", "XCHGW", "XCHGQ", "XADDB", "XADDL", "XADDW", "XADDQ", "XLAT", //
    "XORB", "XORL", "XORW", "XORQ", //
    "SHLDL", "SHLDW", "SHLDQ", "SHRDL", "SHRDW", "SHRDQ", //
    "FMOVD", "FMOVF", "FMOVL", "FMOVV", "FMOVW", "FADDD", "FADDF", "FSUBD", "FSUBF", //
    "FMULD", "FMULF", "FDIVD", "FDIVF", "FCHS", "FABS", "FSQRT", //
    "FFREE", "FLDCW", "FLDENV", "FRSTOR", "FSAVE", "FSTCW", "FSTENV", "FSTSW", //
    "FXRSTOR", "FXRSTOR64", "FXSAVE", "FXSAVE64", "LDMXCSR", "STMXCSR", //
    "ADDPD", "ADDPS", "ADDSD", "ADDSS", "ANDNPD", "ANDNPS", "ANDPD", "ANDPS", //
    "CMPPD", "CMPPS", "CMPSD", "CMPSS", "COMISD", "COMISS", //
    "CVTSD2SL", "CVTSD2SQ", "CVTSD2SS", "CVTSL2SD", "CVTSQ2SD", "CVTSS2SD", "CVTTSD2SQ", //
    "DIVPD", "DIVPS", "DIVSD", "DIVSS", "MASKMOVOU", "MAXSD", "MINSD", //
    "MULPD", "MULPS", "MULSD", "MULSS", "ORPD", "ORPS", //
    "PADDB", "PADDL", "PADDQ", "PADDW", "PAND", "PANDN", "PCMPEQB", "PCMPEQL", //
    "PEXTRW", "PINSRW", "PMOVMSKB", "POR", "PSHUFB", "PSHUFD", "PSHUFL", "PSHUFHW", //
    "PSLLQ", "PSLLO", "PSRLQ", "PSRLO", "PSUBB", "PSUBQ", "PUNPCKLBW", "PXOR", //
    "SHUFPD", "SHUFPS", "SQRTSD", "SQRTSS", "SUBPD", "SUBPS", "SUBSD", "SUBSS", //
    "UCOMISD", "UCOMISS", "XORPD", "XORPS", //
    "AESENC", "AESENCLAST", "AESDEC", "AESDECLAST", "AESIMC", "AESKEYGENASSIST", "PCLMULQDQ", //
    "CRC32B", "CRC32Q", "PREFETCHT0", "PREFETCHT1", "PREFETCHT2", "PREFETCHNTA", //
    "MFENCE", "LFENCE", "SFENCE", "EMMS", "UNDEF", //
    "CALL", "DATA", "GLOBL", "GOK", "HISTORY", "NAME", "TEXT", "END", //
    "USEFIELD", "TYPE", "FUNCDATA", "PCDATA", "CHECKNIL", "VARDEF", "VARKILL", "DUFFCOPY", "DUFFZERO",
];

pub(crate) const ALIASES: &[(&str, &str)] = &[
    ("JB", "JCS"),
    ("JC", "JCS"),
    ("JNAE", "JCS"),
    ("JLO", "JCS"),
    ("JAE", "JCC"),
    ("JNB", "JCC"),
    ("JNC", "JCC"),
    ("JHS", "JCC"),
    ("JE", "JEQ"),
    ("JZ", "JEQ"),
    ("JNZ", "JNE"),
    ("JBE", "JLS"),
    ("JNA", "JLS"),
    ("JA", "JHI"),
    ("JNBE", "JHI"),
    ("JS", "JMI"),
    ("JNS", "JPL"),
    ("JP", "JPS"),
    ("JPE", "JPS"),
    ("JNP", "JPC"),
    ("JPO", "JPC"),
    ("JL", "JLT"),
    ("JNGE", "JLT"),
    ("JNL", "JGE"),
    ("JNG", "JLE"),
    ("JG", "JGT"),
    ("JNLE", "JGT"),
    ("MASKMOVDQU", "MASKMOVOU"),
    ("MOVD", "MOVQ"),
    ("MOVDQ2Q", "MOVQ"),
];

// These write to the destination slot.
pub(crate) const UNARY_DESTINATION: &[&str] = &[
    "BSWAPL", "BSWAPQ", "CMPXCHG8B", //
    "DECB", "DECL", "DECQ", "DECW", "INCB", "INCL", "INCQ", "INCW", //
    "NEGB", "NEGL", "NEGQ", "NEGW", "NOTB", "NOTL", "NOTQ", "NOTW", //
    "POPL", "POPQ", "POPW", //
    "SETCC", "SETCS", "SETEQ", "SETGE", "SETGT", "SETHI", "SETLE", "SETLS", //
    "SETLT", "SETMI", "SETNE", "SETOC", "SETOS", "SETPC", "SETPL", "SETPS", //
    "FFREE", "FLDENV", "FSAVE", "FSTCW", "FSTENV", "FSTSW", //
    "FXSAVE", "FXSAVE64", "STMXCSR",
];
